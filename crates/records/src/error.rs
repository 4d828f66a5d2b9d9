//! Record Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A record I/O error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or writing the underlying file failed.
    #[display("I/O error")]
    Io,
    /// The CSV data is malformed.
    #[display("malformed CSV")]
    Csv,
    /// Opening through the integrity layer failed: the file is missing, or
    /// no longer matches its stored digest. See the error tree for details.
    #[display("integrity-checked access failed")]
    Integrity,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
