//! Error kinds reported by the scanner, the argument pack and the integer path.

use thiserror::Error;

/// Failure of a single formatting call.
///
/// Every variant aborts the call. Output appended to the caller's buffer before
/// the failure point is left in place; [`crate::format`] discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A placeholder index is not below the argument count.
    #[error("placeholder index {index} is out of range ({count} argument(s))")]
    OutOfRangeReference { index: usize, count: usize },
    /// A character other than a digit or `}` appeared inside a placeholder.
    #[error("invalid character {found:?} inside placeholder at byte {offset}")]
    MalformedPlaceholder { found: char, offset: usize },
    /// The template ended while a placeholder was still open.
    #[error("placeholder opened at byte {offset} was never closed")]
    UnterminatedPlaceholder { offset: usize },
    /// The integer digit buffer was exhausted.
    #[error("integer rendering exceeded {capacity} decimal digits")]
    DigitOverflow { capacity: usize },
    /// A value's `Display` implementation reported an error.
    #[error("value rendering failed")]
    Render,
}

impl FormatError {
    /// Stable variant name, used by fixtures and logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::OutOfRangeReference { .. } => "OutOfRangeReference",
            Self::MalformedPlaceholder { .. } => "MalformedPlaceholder",
            Self::UnterminatedPlaceholder { .. } => "UnterminatedPlaceholder",
            Self::DigitOverflow { .. } => "DigitOverflow",
            Self::Render => "Render",
        }
    }

    /// Returns true for internal consistency failures that no template or
    /// argument change can fix.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DigitOverflow { .. })
    }
}
