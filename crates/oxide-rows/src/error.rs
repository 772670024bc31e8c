//! Path tokenizing errors.

/// A result-column alias that cannot be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A bracket holds something other than digits, or an index too large
    /// for `usize`.
    #[error("Unsupported bracket syntax in key: {0}")]
    UnsupportedBracket(String),

    /// A `[` without a matching `]`.
    #[error("Unterminated bracket in key: {0}")]
    UnterminatedBracket(String),

    /// An index above [`MAX_ARRAY_INDEX`](crate::path::MAX_ARRAY_INDEX).
    #[error("Array index out of range in key: {0}")]
    IndexOutOfRange(String),

    /// `[]`
    #[error("Empty or non-numeric bracket in key: {0}")]
    EmptyBracket(String),
}
