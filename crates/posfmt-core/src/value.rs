//! The text-conversion capability required of every argument.

use core::fmt::{self, Write as _};
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::FormatError;
use crate::integer::DecimalInteger;

/// A value that can append its textual form to an output buffer.
///
/// Integers take the fast decimal path in [`crate::integer`]; floats, `bool`
/// and `char` go through `Display`. Any other `Display` type can be passed by
/// wrapping it with [`display`].
pub trait FormatValue {
    /// Append the rendering of `self` to `out`.
    fn append_to(&self, out: &mut String) -> Result<(), FormatError>;
}

macro_rules! impl_integer_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormatValue for $ty {
                #[inline]
                fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
                    self.append_decimal(out)
                }
            }
        )*
    };
}

macro_rules! impl_display_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormatValue for $ty {
                #[inline]
                fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
                    append_display(out, self)
                }
            }
        )*
    };
}

impl_integer_value!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_display_value!(f32, f64, bool, char);

impl FormatValue for str {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        out.push_str(self);
        Ok(())
    }
}

impl FormatValue for String {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        out.push_str(self);
        Ok(())
    }
}

impl FormatValue for Cow<'_, str> {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        out.push_str(self);
        Ok(())
    }
}

impl<T: FormatValue + ?Sized> FormatValue for &T {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        (**self).append_to(out)
    }
}

impl<T: FormatValue + ?Sized> FormatValue for &mut T {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        (**self).append_to(out)
    }
}

impl<T: FormatValue + ?Sized> FormatValue for Box<T> {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        (**self).append_to(out)
    }
}

impl<T: FormatValue + ?Sized> FormatValue for Rc<T> {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        (**self).append_to(out)
    }
}

impl<T: FormatValue + ?Sized> FormatValue for Arc<T> {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        (**self).append_to(out)
    }
}

/// Adapter rendering any [`fmt::Display`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViaDisplay<T>(pub T);

impl<T: fmt::Display> FormatValue for ViaDisplay<T> {
    #[inline]
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        append_display(out, &self.0)
    }
}

/// Wrap `value` so it renders through its `Display` impl.
#[must_use]
pub const fn display<T: fmt::Display>(value: T) -> ViaDisplay<T> {
    ViaDisplay(value)
}

/// Render a single value on its own.
pub fn render_value<T: FormatValue + ?Sized>(value: &T) -> Result<String, FormatError> {
    let mut out = String::new();
    value.append_to(&mut out)?;
    Ok(out)
}

fn append_display<T: fmt::Display + ?Sized>(out: &mut String, value: &T) -> Result<(), FormatError> {
    write!(out, "{value}").map_err(|_| FormatError::Render)
}
