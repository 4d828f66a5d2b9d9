//! Digests of files on disk and the sibling files that store them.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::instrument;

use crate::algorithm::Algorithm;
use crate::error::{Error, ErrorKind, Result};

/// What to do when a file no longer matches its stored digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub enum OnError {
    /// Fail with [`ErrorKind::IntegrityMismatch`].
    #[default]
    Raise,
    /// Log a warning and carry on.
    Warn,
    /// Skip validation entirely.
    Ignore,
}
impl OnError {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnError::Raise => "raise",
            OnError::Warn => "warn",
            OnError::Ignore => "ignore",
        }
    }
}
impl FromStr for OnError {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raise" => Ok(OnError::Raise),
            "warn" => Ok(OnError::Warn),
            "ignore" => Ok(OnError::Ignore),
            _ => exn::bail!(ErrorKind::InvalidPolicy(s.to_string())),
        }
    }
}
impl TryFrom<String> for OnError {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        value.as_str().parse()
    }
}
impl From<OnError> for String {
    fn from(value: OnError) -> Self {
        value.as_str().to_string()
    }
}
impl Display for OnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A file whose current digest differs from the one stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: PathBuf,
    pub expected: Vec<u8>,
    pub actual: Vec<u8>,
}
impl Mismatch {
    pub fn new(path: impl Into<PathBuf>, expected: Vec<u8>, actual: Vec<u8>) -> Self {
        Self { path: path.into(), expected, actual }
    }
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} has been modified since it was last generated: expected {} digest, got {}",
            self.path.display(),
            hex::encode(&self.expected),
            hex::encode(&self.actual),
        )
    }
}

/// Location of the digest file that tracks `path`.
///
/// The algorithm name is appended to the full file name, so `data.csv`
/// is tracked by `data.csv.sha256` and `testfile` by `testfile.sha256`.
///
/// ```
/// use std::path::Path;
/// use arm5_hashio::{Algorithm, digest_path};
///
/// assert_eq!(digest_path("saga/vis.csv", Algorithm::Sha256), Path::new("saga/vis.csv.sha256"));
/// assert_eq!(digest_path("saga/notes", Algorithm::Blake3), Path::new("saga/notes.blake3"));
/// ```
pub fn digest_path(path: impl AsRef<Path>, algorithm: Algorithm) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_os_string();
    name.push(".");
    name.push(algorithm.name());
    PathBuf::from(name)
}

/// Stream the contents of `path` through `algorithm`, returning the raw
/// digest bytes.
#[instrument(skip_all, fields(path = %path.as_ref().display(), %algorithm))]
pub fn path_digest(path: impl AsRef<Path>, algorithm: Algorithm) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| ErrorKind::from_io(e, path))?;
    let mut hasher = algorithm.hasher();
    std::io::copy(&mut file, &mut hasher).map_err(|e| ErrorKind::from_io(e, path))?;
    Ok(hasher.finalize())
}

/// Verify that `path` currently digests to `expected`.
///
/// On mismatch, [`OnError::Raise`] fails with
/// [`ErrorKind::IntegrityMismatch`] while [`OnError::Warn`] logs a warning and
/// returns the [`Mismatch`] to the caller. [`OnError::Ignore`] skips the check.
pub fn validate_path(
    path: impl AsRef<Path>,
    algorithm: Algorithm,
    expected: &[u8],
    on_error: OnError,
) -> Result<Option<Mismatch>> {
    let path = path.as_ref();
    if on_error == OnError::Ignore {
        return Ok(None);
    }
    let actual = path_digest(path, algorithm)?;
    if actual == expected {
        return Ok(None);
    }
    let mismatch = Mismatch::new(path, expected.to_vec(), actual);
    match on_error {
        OnError::Raise => exn::bail!(ErrorKind::IntegrityMismatch(mismatch)),
        OnError::Warn | OnError::Ignore => {
            tracing::warn!(
                path = %path.display(),
                expected = %hex::encode(&mismatch.expected),
                actual = %hex::encode(&mismatch.actual),
                "File has been modified since it was last generated"
            );
            Ok(Some(mismatch))
        },
    }
}
