//! File modes, parsed from the familiar `fopen`-style strings.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// The primary access requested when opening a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    /// `r`: read an existing file.
    Read,
    /// `w`: create the file, or truncate it if it exists.
    Write,
    /// `a`: create the file if needed, and write at its end.
    Append,
    /// `x`: create the file, failing if it already exists.
    Create,
}

/// How to open a file: an [`Access`] and whether the `+` (update) flag was
/// given, which adds reading to the writing modes and writing to `r`.
///
/// The `b` and `t` flags are accepted and ignored; files are always bytes.
///
/// ```
/// use arm5_hashio::{Access, Mode};
///
/// let mode: Mode = "rb+".parse().unwrap();
/// assert_eq!(mode.access, Access::Read);
/// assert!(mode.update);
/// assert!(!mode.is_write_or_append());
/// assert!("wt".parse::<Mode>().unwrap().is_write_or_append());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mode {
    pub access: Access,
    pub update: bool,
}
impl Mode {
    pub const READ: Mode = Mode { access: Access::Read, update: false };
    pub const WRITE: Mode = Mode { access: Access::Write, update: false };
    pub const APPEND: Mode = Mode { access: Access::Append, update: false };
    pub const CREATE: Mode = Mode { access: Access::Create, update: false };

    /// The same access with the `+` flag set.
    #[must_use]
    pub fn with_update(self) -> Self {
        Self { update: true, ..self }
    }

    /// Whether the file's content is replaced or extended, which invalidates
    /// its stored digest.
    pub fn is_write_or_append(&self) -> bool {
        matches!(self.access, Access::Write | Access::Append)
    }

    /// Equivalent [`OpenOptions`].
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self.access {
            Access::Read => options.read(true).write(self.update),
            Access::Write => options.write(true).create(true).truncate(true).read(self.update),
            Access::Append => options.append(true).create(true).read(self.update),
            Access::Create => options.write(true).create_new(true).read(self.update),
        };
        options
    }
}
impl Default for Mode {
    fn default() -> Self {
        Self::READ
    }
}
impl FromStr for Mode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut access = None;
        let mut update = false;
        for c in s.chars() {
            let next = match c {
                'r' => Access::Read,
                'w' => Access::Write,
                'a' => Access::Append,
                'x' => Access::Create,
                '+' if !update => {
                    update = true;
                    continue;
                },
                'b' | 't' => continue,
                _ => exn::bail!(ErrorKind::InvalidMode(s.to_string())),
            };
            if access.replace(next).is_some() {
                // Exactly one of r/w/a/x is allowed.
                exn::bail!(ErrorKind::InvalidMode(s.to_string()));
            }
        }
        match access {
            Some(access) => Ok(Self { access, update }),
            None => exn::bail!(ErrorKind::InvalidMode(s.to_string())),
        }
    }
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let access = match self.access {
            Access::Read => "r",
            Access::Write => "w",
            Access::Append => "a",
            Access::Create => "x",
        };
        write!(f, "{access}{}", if self.update { "+" } else { "" })
    }
}
