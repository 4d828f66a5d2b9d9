//! Model Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A model error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value matches no canonical name or alias of the category.
    #[display("unknown {category} value: {value}")]
    UnknownCategoryValue {
        /// Name of the categorical type being parsed.
        category: &'static str,
        /// The raw value that failed to resolve.
        value: String,
    },
    /// The value is a prefix of no variant name.
    #[display("Invalid {category} '{value}': expected one of {expected}")]
    InvalidCategoryPrefix {
        /// Name of the categorical type being parsed.
        category: &'static str,
        /// The lower-cased prefix.
        value: String,
        /// Quoted list of every valid variant name.
        expected: String,
    },
    /// The value is a prefix of more than one variant name.
    #[display("Ambiguous {category} '{value}': matches {matches}")]
    AmbiguousCategoryPrefix {
        /// Name of the categorical type being parsed.
        category: &'static str,
        /// The lower-cased prefix.
        value: String,
        /// Quoted list of the matching variant names.
        matches: String,
    },
    /// A year must be a positive integer.
    #[display("invalid year: {_0}")]
    InvalidYear(#[error(not(source))] i64),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Parsing is deterministic; the same input fails the same way.
        false
    }
}
