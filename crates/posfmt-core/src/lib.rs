//! # posfmt-core
//!
//! Positional string formatting: `{n}` placeholders in a template are
//! replaced by the textual form of the n-th argument.
//!
//! ```
//! use posfmt_core::positional;
//!
//! let greeting = positional!("{1} {0}!", "world", "hello").unwrap();
//! assert_eq!(greeting, "hello world!");
//! ```
//!
//! Integers are rendered by a dedicated digit loop ([`integer`]); every other
//! argument type supplies its text through [`FormatValue`]. Arguments are
//! borrowed, never cloned. No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod error;
pub mod integer;
pub mod pack;
pub mod scanner;
pub mod value;

pub use error::FormatError;
pub use integer::{DecimalInteger, MAX_DECIMAL_DIGITS, append_integer};
pub use pack::ArgPack;
pub use scanner::{ScanPolicy, Scanner, append_format, format};
pub use value::{FormatValue, ViaDisplay, display, render_value};

/// Format a template with borrowed arguments.
///
/// Expands to [`format`] with a tuple holding a reference to every argument,
/// so arguments are neither moved nor cloned.
///
/// ```
/// let n = 5;
/// assert_eq!(posfmt_core::positional!("{0} {0}", n).unwrap(), "5 5");
/// ```
#[macro_export]
macro_rules! positional {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format($template, ($(&$arg,)*))
    };
}
