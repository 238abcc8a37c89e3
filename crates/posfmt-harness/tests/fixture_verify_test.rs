//! Integration test: conformance fixtures under tests/conformance/fixtures.
//!
//! Validates that:
//! 1. Every fixture file parses and every case has exactly one expectation.
//! 2. Every case passes under each policy it applies to.
//! 3. Policy-specific cases only run under their own policy.
//!
//! Run: cargo test -p posfmt-harness --test fixture_verify_test

use std::path::{Path, PathBuf};

use posfmt_core::ScanPolicy;
use posfmt_harness::fixtures::fixture_paths;
use posfmt_harness::{ConformanceReport, FixtureSet, TestRunner};

fn workspace_root() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn load_sets() -> Vec<FixtureSet> {
    let dir = workspace_root().join("tests/conformance/fixtures");
    let paths = fixture_paths(&dir).expect("fixture directory must exist");
    assert!(!paths.is_empty(), "no fixtures found in {}", dir.display());
    paths
        .iter()
        .map(|p| FixtureSet::from_file(p).unwrap_or_else(|e| panic!("{}: {e}", p.display())))
        .collect()
}

#[test]
fn fixtures_are_well_formed() {
    for set in load_sets() {
        assert!(!set.cases.is_empty(), "family {} has no cases", set.family);
        for case in &set.cases {
            case.expectation()
                .unwrap_or_else(|e| panic!("{}/{}: {e}", set.family, case.name));
            case.resolve_args()
                .unwrap_or_else(|e| panic!("{}/{}: {e}", set.family, case.name));
            let policy = case.policy.to_ascii_lowercase();
            assert!(
                ["strict", "lenient", "both"].contains(&policy.as_str()),
                "{}/{}: unknown policy {}",
                set.family,
                case.name,
                case.policy
            );
        }
    }
}

#[test]
fn all_fixture_cases_pass_under_both_policies() {
    let sets = load_sets();
    let mut results = Vec::new();
    for policy in [ScanPolicy::Strict, ScanPolicy::Lenient] {
        let runner = TestRunner::new("fixture-verify-test", policy);
        for set in &sets {
            results.extend(runner.run(set));
        }
    }

    let report = ConformanceReport::new("fixture-verify-test", "fixed", results);
    assert!(report.total_cases > 0);
    assert!(report.all_passed(), "{}", report.to_markdown());
}

#[test]
fn policy_specific_cases_are_filtered() {
    let sets = load_sets();
    let errors = sets
        .iter()
        .find(|s| s.family == "errors")
        .expect("errors fixture family");

    let strict = TestRunner::new("t", ScanPolicy::Strict).run(errors);
    let lenient = TestRunner::new("t", ScanPolicy::Lenient).run(errors);

    assert!(strict.iter().any(|r| r.case_name == "malformed_letter_strict"));
    assert!(!strict.iter().any(|r| r.case_name == "malformed_letter_lenient"));
    assert!(lenient.iter().any(|r| r.case_name == "malformed_letter_lenient"));
    assert!(!lenient.iter().any(|r| r.case_name == "malformed_letter_strict"));
}
