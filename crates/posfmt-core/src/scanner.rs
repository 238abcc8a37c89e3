//! Single-pass `{n}` template scanner.
//!
//! The scanner copies literal runs verbatim and, for every completed
//! placeholder, asks the argument pack to render the referenced value. It
//! stops at the end of the template or at the first NUL character.

use crate::error::FormatError;
use crate::pack::ArgPack;

/// How an invalid character inside a placeholder is treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPolicy {
    /// Fail with [`FormatError::MalformedPlaceholder`].
    #[default]
    Strict,
    /// Skip the character and keep reading the index.
    Lenient,
}

impl ScanPolicy {
    /// Parse from string (case-insensitive). Unknown names give `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "lenient" | "loose" | "permissive" => Self::Lenient,
            _ => Self::Strict,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsidePlaceholder { index: usize, opened_at: usize },
}

/// Template scanner configured with a [`ScanPolicy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scanner {
    policy: ScanPolicy,
}

impl Scanner {
    /// Create a scanner with the given policy.
    #[must_use]
    pub const fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    /// The policy this scanner applies.
    #[must_use]
    pub const fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Format `template` with `args` into a new string.
    pub fn format<P: ArgPack>(&self, template: &str, args: P) -> Result<String, FormatError> {
        let mut out = String::with_capacity(template.len());
        self.append(&mut out, template, args)?;
        Ok(out)
    }

    /// Append the formatted `template` to `out`.
    ///
    /// On error, text appended before the failing placeholder stays in `out`.
    pub fn append<P: ArgPack>(
        &self,
        out: &mut String,
        template: &str,
        args: P,
    ) -> Result<(), FormatError> {
        let bytes = template.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let count = args.len();

        let mut state = ScanState::Outside;
        let mut pos = 0;

        // `pos` only ever stops on ASCII bytes or after whole characters, so
        // every slice below lands on a char boundary.
        while pos < end {
            match state {
                ScanState::Outside => {
                    let start = pos;
                    while pos < end && bytes[pos] != b'{' {
                        pos += 1;
                    }
                    out.push_str(&template[start..pos]);
                    if pos < end {
                        state = ScanState::InsidePlaceholder {
                            index: 0,
                            opened_at: pos,
                        };
                        pos += 1;
                    }
                }
                ScanState::InsidePlaceholder { index, opened_at } => match bytes[pos] {
                    digit @ b'0'..=b'9' => {
                        state = ScanState::InsidePlaceholder {
                            index: index
                                .saturating_mul(10)
                                .saturating_add(usize::from(digit - b'0')),
                            opened_at,
                        };
                        pos += 1;
                    }
                    b'}' => {
                        if index >= count {
                            return Err(FormatError::OutOfRangeReference { index, count });
                        }
                        args.render_at(index, out)?;
                        state = ScanState::Outside;
                        pos += 1;
                    }
                    _ => {
                        let Some(found) = template[pos..].chars().next() else {
                            break;
                        };
                        match self.policy {
                            ScanPolicy::Strict => {
                                return Err(FormatError::MalformedPlaceholder {
                                    found,
                                    offset: pos,
                                });
                            }
                            ScanPolicy::Lenient => pos += found.len_utf8(),
                        }
                    }
                },
            }
        }

        if let ScanState::InsidePlaceholder { opened_at, .. } = state {
            return Err(FormatError::UnterminatedPlaceholder { offset: opened_at });
        }
        Ok(())
    }
}

/// Format `template` with `args` using the strict policy.
///
/// ```
/// let s = posfmt_core::format("{1} {0}!", ("world", "hello")).unwrap();
/// assert_eq!(s, "hello world!");
/// ```
pub fn format<P: ArgPack>(template: &str, args: P) -> Result<String, FormatError> {
    Scanner::default().format(template, args)
}

/// Append the formatted `template` to `out` using the strict policy.
pub fn append_format<P: ArgPack>(
    out: &mut String,
    template: &str,
    args: P,
) -> Result<(), FormatError> {
    Scanner::default().append(out, template, args)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_only() {
        assert_eq!(format("no placeholders here", ()).unwrap(), "no placeholders here");
        assert_eq!(format("", ()).unwrap(), "");
    }

    #[test]
    fn test_single_placeholder() {
        assert_eq!(format("x={0}", (12u32,)).unwrap(), "x=12");
    }

    #[test]
    fn test_reordering() {
        assert_eq!(
            format("{1} {0}!", ("world", "hello")).unwrap(),
            "hello world!"
        );
    }

    #[test]
    fn test_multi_digit_index() {
        let pack = (0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, "eleven");
        assert_eq!(format("[{11}]", pack).unwrap(), "[eleven]");
        assert_eq!(format("[{011}]", pack).unwrap(), "[eleven]");
    }

    #[test]
    fn test_empty_braces_mean_index_zero() {
        assert_eq!(format("{}", ("first",)).unwrap(), "first");
    }

    #[test]
    fn test_stray_close_brace_is_literal() {
        assert_eq!(format("a}b", ()).unwrap(), "a}b");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            format("{1}", (5,)),
            Err(FormatError::OutOfRangeReference { index: 1, count: 1 })
        );
        assert_eq!(
            format("{0}", ()),
            Err(FormatError::OutOfRangeReference { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_huge_index_saturates() {
        let err = format("{99999999999999999999999999}", (1,)).unwrap_err();
        assert_eq!(
            err,
            FormatError::OutOfRangeReference {
                index: usize::MAX,
                count: 1
            }
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            format("abc{0", (1,)),
            Err(FormatError::UnterminatedPlaceholder { offset: 3 })
        );
        assert_eq!(
            format("{", ()),
            Err(FormatError::UnterminatedPlaceholder { offset: 0 })
        );
    }

    #[test]
    fn test_malformed_strict() {
        assert_eq!(
            format("{0a}", (1,)),
            Err(FormatError::MalformedPlaceholder {
                found: 'a',
                offset: 2
            })
        );
        assert_eq!(
            format("{{0}}", (1,)),
            Err(FormatError::MalformedPlaceholder {
                found: '{',
                offset: 1
            })
        );
    }

    #[test]
    fn test_malformed_reports_full_character() {
        assert_eq!(
            format("{é}", (1,)),
            Err(FormatError::MalformedPlaceholder {
                found: 'é',
                offset: 1
            })
        );
    }

    #[test]
    fn test_lenient_skips_invalid_characters() {
        let scanner = Scanner::new(ScanPolicy::Lenient);
        assert_eq!(scanner.format("{ 1 }", ("a", "b")).unwrap(), "b");
        assert_eq!(scanner.format("{é0}", ("a",)).unwrap(), "a");
        assert_eq!(
            scanner.format("{x", ()),
            Err(FormatError::UnterminatedPlaceholder { offset: 0 })
        );
    }

    #[test]
    fn test_nul_terminates_template() {
        assert_eq!(format("ab\0{9}", ()).unwrap(), "ab");
        assert_eq!(
            format("{0\0}", (1,)),
            Err(FormatError::UnterminatedPlaceholder { offset: 0 })
        );
    }

    #[test]
    fn test_append_keeps_existing_output() {
        let mut out = String::from(">> ");
        append_format(&mut out, "{0}-{1}", (1, 2)).unwrap();
        assert_eq!(out, ">> 1-2");
    }

    #[test]
    fn test_append_error_keeps_partial_output() {
        let mut out = String::new();
        let err = append_format(&mut out, "ok {0} then {3}", (7,)).unwrap_err();
        assert_eq!(err, FormatError::OutOfRangeReference { index: 3, count: 1 });
        assert_eq!(out, "ok 7 then ");
    }

    #[test]
    fn test_policy_parse_loose() {
        assert_eq!(ScanPolicy::from_str_loose("LENIENT"), ScanPolicy::Lenient);
        assert_eq!(ScanPolicy::from_str_loose("loose"), ScanPolicy::Lenient);
        assert_eq!(ScanPolicy::from_str_loose("strict"), ScanPolicy::Strict);
        assert_eq!(ScanPolicy::from_str_loose("bogus"), ScanPolicy::Strict);
        assert_eq!(ScanPolicy::Lenient.as_str(), "lenient");
    }
}
