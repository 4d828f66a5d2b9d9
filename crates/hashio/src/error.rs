//! Integrity Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use crate::digest::Mismatch;

/// An integrity error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for integrity-checked file operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The file no longer matches its stored digest. Inspect it by hand
    /// before regenerating it.
    #[display("{_0}")]
    IntegrityMismatch(#[error(not(source))] Mismatch),
    /// The requested digest algorithm is not recognized.
    #[display("unsupported digest algorithm: {_0}")]
    UnsupportedAlgorithm(#[error(not(source))] String),
    /// The mode string is not a valid file mode.
    #[display("invalid file mode: {_0}")]
    InvalidMode(#[error(not(source))] String),
    /// The name is not a valid integrity error policy.
    #[display("invalid error policy: {_0}")]
    InvalidPolicy(#[error(not(source))] String),
    /// File does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// File already exists (for modes that require new files)
    #[display("file already exists: {}", _0.display())]
    AlreadyExists(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    pub(crate) fn from_io(e: IoError, path: &Path) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(e),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::UnsupportedAlgorithm("md4".to_string()).to_string(), "unsupported digest algorithm: md4");
        assert_eq!(ErrorKind::InvalidMode("rw".to_string()).to_string(), "invalid file mode: rw");
        assert_eq!(ErrorKind::NotFound(PathBuf::from("a/b.csv")).to_string(), "file not found: a/b.csv");
    }

    #[test]
    fn error_kind_from_io() {
        let path = Path::new("data.csv");
        let not_found = IoError::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(ErrorKind::from_io(not_found, path), ErrorKind::NotFound(p) if p == path));
        let other = IoError::other("disk on fire");
        let kind = ErrorKind::from_io(other, path);
        assert!(matches!(kind, ErrorKind::Io(_)));
        assert!(kind.is_retryable());
    }

    #[test]
    fn mismatch_is_not_retryable() {
        let mismatch = Mismatch::new("data.csv", vec![0x01], vec![0x02]);
        assert!(!ErrorKind::IntegrityMismatch(mismatch).is_retryable());
    }
}
