#![no_main]
use libfuzzer_sys::fuzz_target;
use posfmt_core::{FormatError, ScanPolicy, Scanner};

fuzz_target!(|data: &[u8]| {
    let template = String::from_utf8_lossy(data);
    let args = (i64::MIN, u64::MAX, "text", 'c', -0.5f64);

    for policy in [ScanPolicy::Strict, ScanPolicy::Lenient] {
        let scanner = Scanner::new(policy);
        let first = scanner.format(&template, args);
        let second = scanner.format(&template, args);
        assert_eq!(first, second, "formatting must be deterministic");

        match first {
            Ok(out) => {
                if !template.contains('{') && !template.contains('\0') {
                    assert_eq!(out.as_str(), &*template);
                }
            }
            Err(err) => {
                assert!(!err.is_fatal(), "fatal error on valid widths: {err}");
                if policy == ScanPolicy::Lenient {
                    assert!(!matches!(err, FormatError::MalformedPlaceholder { .. }));
                }
            }
        }
    }
});
