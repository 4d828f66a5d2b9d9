//! Opening files with digest validation on the way in, and digest
//! regeneration on the way out.

use std::fs::{self, File};
use std::io::{Read, Result as IoResult, Seek, SeekFrom, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::algorithm::Algorithm;
use crate::digest::{Mismatch, OnError, digest_path, path_digest, validate_path};
use crate::error::{ErrorKind, Result};
use crate::mode::Mode;

/// Opens files, checking them against their sibling digest file first and,
/// for writes, regenerating that digest once the file is released.
///
/// Before a file is opened its current digest is compared against the one
/// stored next to it (see [`digest_path`]), if any. What happens on a
/// mismatch depends on [`OnError`].
///
/// When a file is opened to write or append, the digest file is deleted
/// first so that a crash mid-write can't leave a stale digest behind. It is
/// recreated when the returned [`HashedFile`] is closed or dropped.
///
/// # Examples
///
/// ```
/// use std::io::{Read, Write};
/// use arm5_hashio::{HashOpener, Mode, OnError};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("covenant.csv");
/// let opener = HashOpener::new().on_error(OnError::Raise);
///
/// opener.with_file(&path, Mode::WRITE, |file| file.write_all(b"name,season\n"))?;
/// assert!(dir.path().join("covenant.csv.sha256").is_file());
///
/// let mut contents = String::new();
/// opener.open(&path, Mode::READ)?.read_to_string(&mut contents)?;
/// assert_eq!(contents, "name,season\n");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOpener {
    algorithm: Algorithm,
    on_error: OnError,
    hash_on_write: bool,
}
impl Default for HashOpener {
    fn default() -> Self {
        Self { algorithm: Algorithm::default(), on_error: OnError::default(), hash_on_write: true }
    }
}
impl HashOpener {
    /// SHA-256 digests, mismatches raise, and writes are hashed.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Select the digest algorithm by name.
    ///
    /// Fails with [`ErrorKind::UnsupportedAlgorithm`] before touching the
    /// filesystem.
    pub fn algorithm_name(self, name: &str) -> Result<Self> {
        Ok(self.algorithm(name.parse()?))
    }

    #[must_use]
    pub fn on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Whether files opened to write or append get a fresh digest on release.
    #[must_use]
    pub fn hash_on_write(mut self, hash_on_write: bool) -> Self {
        self.hash_on_write = hash_on_write;
        self
    }

    pub fn get_algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn get_on_error(&self) -> OnError {
        self.on_error
    }

    pub fn get_hash_on_write(&self) -> bool {
        self.hash_on_write
    }

    /// Open `path` with `mode`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IntegrityMismatch`] if the stored digest is out of date
    /// and the policy is [`OnError::Raise`]; the file is not opened in that
    /// case. Otherwise any I/O error from reading the digest, removing it, or
    /// opening the file.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), %mode, algorithm = %self.algorithm))]
    pub fn open(&self, path: impl AsRef<Path>, mode: Mode) -> Result<HashedFile> {
        let path = path.as_ref();
        let digest_path = digest_path(path, self.algorithm);

        let mut warning = None;
        if self.on_error != OnError::Ignore && path.is_file() && digest_path.is_file() {
            let expected = fs::read(&digest_path).map_err(|e| ErrorKind::from_io(e, &digest_path))?;
            warning = validate_path(path, self.algorithm, &expected, self.on_error)?;
        }

        if mode.is_write_or_append() && digest_path.is_file() {
            fs::remove_file(&digest_path).map_err(|e| ErrorKind::from_io(e, &digest_path))?;
            tracing::debug!(digest = %digest_path.display(), "Removed digest file ahead of write");
        }

        let file = mode.open_options().open(path).map_err(|e| ErrorKind::from_io(e, path))?;
        let pending = (mode.is_write_or_append() && self.hash_on_write)
            .then(|| PendingDigest { path: digest_path, algorithm: self.algorithm });
        Ok(HashedFile { file, path: path.to_path_buf(), pending, warning })
    }

    /// Open `path`, hand the file to `f`, then close it.
    ///
    /// The file is closed (and, when writing, its digest regenerated) whether
    /// or not `f` succeeds. An error from `f` takes precedence over an error
    /// from closing.
    pub fn with_file<T>(
        &self,
        path: impl AsRef<Path>,
        mode: Mode,
        f: impl FnOnce(&mut HashedFile) -> IoResult<T>,
    ) -> Result<T> {
        let mut file = self.open(path, mode)?;
        match f(&mut file) {
            Ok(value) => {
                file.close()?;
                Ok(value)
            },
            Err(e) => {
                let path = file.path.clone();
                if let Err(close) = file.close() {
                    tracing::error!(path = %path.display(), error = %close, "Failed to close file after error");
                }
                exn::bail!(ErrorKind::from_io(e, &path))
            },
        }
    }
}

#[derive(Debug)]
struct PendingDigest {
    path: PathBuf,
    algorithm: Algorithm,
}

/// A file opened by [`HashOpener`].
///
/// Reads, writes and seeks go straight to the underlying [`File`]. When the
/// file was opened to write or append, releasing it (through
/// [`close`](Self::close) or by dropping it) digests its final contents and
/// stores them next to it.
#[derive(Debug)]
pub struct HashedFile {
    file: File,
    path: PathBuf,
    pending: Option<PendingDigest>,
    warning: Option<Mismatch>,
}
impl HashedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mismatch found when opening under [`OnError::Warn`], if any.
    pub fn integrity_warning(&self) -> Option<&Mismatch> {
        self.warning.as_ref()
    }

    /// Whether releasing this file will write a new digest.
    pub fn rehashes_on_close(&self) -> bool {
        self.pending.is_some()
    }

    /// Close the file, writing its digest file if it was opened to write.
    ///
    /// Unlike dropping, this reports failures to the caller.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        self.file.flush().map_err(|e| ErrorKind::from_io(e, &self.path))?;
        let digest = path_digest(&self.path, pending.algorithm)?;
        fs::write(&pending.path, &digest).map_err(|e| ErrorKind::from_io(e, &pending.path))?;
        tracing::debug!(
            path = %self.path.display(),
            digest = %hex::encode(&digest),
            algorithm = %pending.algorithm,
            "Stored digest"
        );
        Ok(())
    }
}
impl Drop for HashedFile {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to store digest on release");
        }
    }
}
impl Deref for HashedFile {
    type Target = File;
    fn deref(&self) -> &File {
        &self.file
    }
}
impl Read for HashedFile {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        self.file.read(buf)
    }
}
impl Write for HashedFile {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.file.flush()
    }
}
impl Seek for HashedFile {
    fn seek(&mut self, pos: SeekFrom) -> IoResult<u64> {
        self.file.seek(pos)
    }
}
