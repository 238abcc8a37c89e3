//! Decimal integer rendering without `core::fmt`.
//!
//! Digits are peeled off with `% 10` into a fixed stack buffer, least
//! significant first, and then emitted in reverse. No allocation happens
//! beyond growing the caller's output string.

use crate::error::FormatError;

/// Digits needed for the widest supported integer (`u128::MAX` has 39).
///
/// 64-bit values need at most 20 (`18446744073709551615`).
pub const MAX_DECIMAL_DIGITS: usize = 39;

/// Fixed-capacity stack of decimal digit values (0..=9).
struct DigitBuf {
    digits: [u8; MAX_DECIMAL_DIGITS],
    len: usize,
}

impl DigitBuf {
    const fn new() -> Self {
        Self {
            digits: [0; MAX_DECIMAL_DIGITS],
            len: 0,
        }
    }

    fn push(&mut self, digit: u8) -> Result<(), FormatError> {
        if self.len == self.digits.len() {
            return Err(FormatError::DigitOverflow {
                capacity: self.digits.len(),
            });
        }
        self.digits[self.len] = digit;
        self.len += 1;
        Ok(())
    }

    /// Emit most significant digit first.
    fn emit(&self, out: &mut String) {
        out.reserve(self.len);
        for &digit in self.digits[..self.len].iter().rev() {
            out.push(char::from(b'0' + digit));
        }
    }
}

/// Integer types with a fast decimal path.
pub trait DecimalInteger: Copy {
    /// Append the decimal form of `self` to `out`.
    fn append_decimal(self, out: &mut String) -> Result<(), FormatError>;
}

macro_rules! impl_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DecimalInteger for $ty {
                fn append_decimal(self, out: &mut String) -> Result<(), FormatError> {
                    if self == 0 {
                        out.push('0');
                        return Ok(());
                    }

                    let mut digits = DigitBuf::new();
                    let mut v = self;
                    loop {
                        digits.push((v % 10) as u8)?;
                        if v < 10 {
                            break;
                        }
                        v /= 10;
                    }
                    digits.emit(out);
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DecimalInteger for $ty {
                fn append_decimal(self, out: &mut String) -> Result<(), FormatError> {
                    if self == 0 {
                        out.push('0');
                        return Ok(());
                    }

                    let mut digits = DigitBuf::new();
                    let mut v = self;
                    if v < 0 {
                        out.push('-');
                        digits.push((-(v % 10)) as u8)?;
                        // Negate only after dividing: |MIN| does not fit in the
                        // same width, |MIN / 10| does.
                        v = -(v / 10);
                        if v == 0 {
                            digits.emit(out);
                            return Ok(());
                        }
                    }
                    loop {
                        digits.push((v % 10) as u8)?;
                        if v < 10 {
                            break;
                        }
                        v /= 10;
                    }
                    digits.emit(out);
                    Ok(())
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

/// Append the decimal form of `value` to `out`.
pub fn append_integer<T: DecimalInteger>(out: &mut String, value: T) -> Result<(), FormatError> {
    value.append_decimal(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: DecimalInteger>(value: T) -> String {
        let mut out = String::new();
        append_integer(&mut out, value).unwrap();
        out
    }

    #[test]
    fn test_zero() {
        assert_eq!(render(0u8), "0");
        assert_eq!(render(0i64), "0");
        assert_eq!(render(0usize), "0");
    }

    #[test]
    fn test_single_digit_negative() {
        assert_eq!(render(-5i32), "-5");
        assert_eq!(render(-9i8), "-9");
    }

    #[test]
    fn test_multi_digit() {
        assert_eq!(render(42u32), "42");
        assert_eq!(render(-123i32), "-123");
        assert_eq!(render(1_000_000u64), "1000000");
        assert_eq!(render(-10i16), "-10");
    }

    #[test]
    fn test_i64_min() {
        assert_eq!(render(i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn test_u64_max() {
        assert_eq!(render(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn test_u128_max_fills_buffer() {
        let out = render(u128::MAX);
        assert_eq!(out.len(), MAX_DECIMAL_DIGITS);
        assert_eq!(out, u128::MAX.to_string());
    }

    #[test]
    fn test_i128_min() {
        assert_eq!(render(i128::MIN), i128::MIN.to_string());
    }

    #[test]
    fn test_appends_after_existing_text() {
        let mut out = String::from("n=");
        append_integer(&mut out, -7i8).unwrap();
        assert_eq!(out, "n=-7");
    }

    #[test]
    fn test_digit_buffer_overflow() {
        let mut digits = DigitBuf::new();
        for _ in 0..MAX_DECIMAL_DIGITS {
            digits.push(9).unwrap();
        }
        let err = digits.push(9).unwrap_err();
        assert_eq!(
            err,
            FormatError::DigitOverflow {
                capacity: MAX_DECIMAL_DIGITS
            }
        );
        assert!(err.is_fatal());
    }
}
