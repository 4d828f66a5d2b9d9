//! Closed, ordered categorical enumerations with case-insensitive aliases.
//!
//! Resolution is a static two-stage lookup: canonical names first, then the
//! alias tables. Both stages ignore case.

use crate::error::{ErrorKind, Result};

/// A closed set of named variants, each with a canonical lowercase name and
/// zero or more aliases.
pub trait Category: Copy + Eq + Sized + 'static {
    /// Human-readable name of the category, used in error messages.
    const NAME: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Canonical lowercase name.
    fn as_str(&self) -> &'static str;

    /// Alternative lowercase names accepted when parsing.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Declaration index, used for ordering and by-value lookup.
    fn rank(&self) -> u8 {
        // Variants are declared at most a couple dozen per category.
        Self::ALL.iter().position(|v| v == self).unwrap_or_default() as u8
    }

    /// By-value lookup, which bypasses names and aliases entirely.
    fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(usize::from(rank)).copied()
    }
}

/// Resolve `value` against the canonical names of `T`, then against its
/// aliases, ignoring case.
pub fn parse<T: Category>(value: &str) -> Result<T> {
    let lowered = value.to_lowercase();
    if let Some(found) = T::ALL.iter().find(|v| v.as_str() == lowered) {
        return Ok(*found);
    }
    match T::ALL.iter().find(|v| v.aliases().contains(&lowered.as_str())) {
        Some(found) => Ok(*found),
        None => exn::bail!(ErrorKind::UnknownCategoryValue {
            category: T::NAME,
            value: value.to_string(),
        }),
    }
}

/// Implements the string plumbing (`FromStr`, `TryFrom<String>`, `TryFrom<u8>`,
/// `Into<String>`, `Display`, `AsRef<str>`) shared by every [`Category`].
macro_rules! category_impls {
    ($ty:ty) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::Error;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $crate::category::parse(s)
            }
        }
        impl TryFrom<String> for $ty {
            type Error = $crate::error::Error;
            fn try_from(value: String) -> ::std::result::Result<Self, Self::Error> {
                value.as_str().parse()
            }
        }
        impl TryFrom<u8> for $ty {
            type Error = $crate::error::Error;
            fn try_from(value: u8) -> ::std::result::Result<Self, Self::Error> {
                match <$ty as $crate::category::Category>::from_rank(value) {
                    Some(v) => Ok(v),
                    None => ::exn::bail!($crate::error::ErrorKind::UnknownCategoryValue {
                        category: <$ty as $crate::category::Category>::NAME,
                        value: value.to_string(),
                    }),
                }
            }
        }
        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                $crate::category::Category::as_str(&value).to_string()
            }
        }
        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &'static str {
                $crate::category::Category::as_str(self)
            }
        }
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::category::Category::as_str(self))
            }
        }
    };
}
pub(crate) use category_impls;
