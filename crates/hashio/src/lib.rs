//! Integrity-checked file access.
//!
//! Generated files get a sibling digest file holding the raw digest of their
//! contents. [`HashOpener`] checks that digest whenever a file is opened and
//! regenerates it after a write, so files that were edited by hand since
//! they were last generated are detected instead of silently overwritten.
//!
//! Digests are for detecting corruption and accidental edits; they do not
//! authenticate anything.

mod algorithm;
mod digest;
pub mod error;
mod mode;
mod open;

pub use crate::algorithm::{Algorithm, Hasher};
pub use crate::digest::{Mismatch, OnError, digest_path, path_digest, validate_path};
pub use crate::mode::{Access, Mode};
pub use crate::open::{HashOpener, HashedFile};
