//! Combinable Hermetic Arts.
//!
//! Unlike [`HermeticTechnique`] and [`HermeticForm`], which name exactly one
//! Art, these are bit sets: a spell or a vis source can involve several Arts
//! at once. Parsing accepts any unambiguous prefix of an Art's name, so
//! `"int"` reads as Intellego, while `"i"` is ambiguous between Ignem and
//! Imaginem.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use bitflags::Flags;

use crate::arts::{HermeticForm, HermeticTechnique};
use crate::category::Category;
use crate::error::{Error, ErrorKind, Result};
use crate::quote::quote;

bitflags::bitflags! {
    /// A set of Hermetic Techniques.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Techniques: u8 {
        const CREO = 1 << 0;
        const INTELLEGO = 1 << 1;
        const MUTO = 1 << 2;
        const PERDO = 1 << 3;
        const REGO = 1 << 4;
    }
}

bitflags::bitflags! {
    /// A set of Hermetic Forms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Forms: u16 {
        const ANIMAL = 1 << 0;
        const AQUAM = 1 << 1;
        const AURAM = 1 << 2;
        const CORPUS = 1 << 3;
        const HERBAM = 1 << 4;
        const IGNEM = 1 << 5;
        const IMAGINEM = 1 << 6;
        const MENTEM = 1 << 7;
        const TERRAM = 1 << 8;
        const VIM = 1 << 9;
    }
}

/// Resolve `value` to the single named flag of `F` whose lowercase name
/// starts with it.
fn parse_prefix<F: Flags + Copy>(category: &'static str, value: &str) -> Result<F> {
    let value = value.to_lowercase();
    let matches: Vec<_> = F::FLAGS
        .iter()
        .filter(|flag| flag.name().to_lowercase().starts_with(&value))
        .collect();
    match matches.as_slice() {
        [] => exn::bail!(ErrorKind::InvalidCategoryPrefix {
            category,
            value,
            expected: quote(F::FLAGS.iter().map(|flag| flag.name().to_lowercase())),
        }),
        [single] => Ok(*single.value()),
        _ => exn::bail!(ErrorKind::AmbiguousCategoryPrefix {
            category,
            value,
            matches: quote(matches.iter().map(|flag| flag.name().to_lowercase())),
        }),
    }
}

/// Lowercase names of the set flags, joined with `" | "`.
fn write_names<F: Flags>(flags: &F, f: &mut Formatter<'_>) -> FmtResult {
    for (i, (name, _)) in flags.iter_names().enumerate() {
        if i > 0 {
            f.write_str(" | ")?;
        }
        f.write_str(&name.to_lowercase())?;
    }
    Ok(())
}

impl FromStr for Techniques {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        parse_prefix("Techniques", s)
    }
}
impl Display for Techniques {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_names(self, f)
    }
}
impl From<HermeticTechnique> for Techniques {
    fn from(value: HermeticTechnique) -> Self {
        Self::from_bits_retain(1 << value.rank())
    }
}
impl Techniques {
    /// The individual Techniques in this set, in declaration order.
    pub fn techniques(&self) -> Vec<HermeticTechnique> {
        HermeticTechnique::ALL.iter().copied().filter(|t| self.contains(Self::from(*t))).collect()
    }
}

impl FromStr for Forms {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        parse_prefix("Forms", s)
    }
}
impl Display for Forms {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_names(self, f)
    }
}
impl From<HermeticForm> for Forms {
    fn from(value: HermeticForm) -> Self {
        Self::from_bits_retain(1 << value.rank())
    }
}
impl Forms {
    /// The individual Forms in this set, in declaration order.
    pub fn forms(&self) -> Vec<HermeticForm> {
        HermeticForm::ALL.iter().copied().filter(|form| self.contains(Self::from(*form))).collect()
    }
}
