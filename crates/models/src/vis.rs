//! Vis: raw magical power, tracked as amounts of a given Art.

use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::arts::Art;
use crate::times::{Season, YearSeason};

/// A known categorical value, or a free-form label for troupes that use
/// house-ruled Arts or seasons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize), serde(untagged))]
pub enum OrCustom<T> {
    Known(T),
    Custom(String),
}
impl<T: FromStr> FromStr for OrCustom<T> {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<T>() {
            Ok(known) => Self::Known(known),
            Err(_) => Self::Custom(s.to_string()),
        })
    }
}
impl<T> OrCustom<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(known) => Some(known),
            Self::Custom(_) => None,
        }
    }
}
impl<T: Display> Display for OrCustom<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Known(known) => write!(f, "{known}"),
            Self::Custom(custom) => f.write_str(custom),
        }
    }
}

/// An amount of vis of a single Art.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct VisAmount {
    pub art: OrCustom<Art>,
    /// Pawns of vis; negative amounts are expenditures.
    pub amount: i64,
}
impl VisAmount {
    pub fn new(art: impl Into<Art>, amount: i64) -> Self {
        Self { art: OrCustom::Known(art.into()), amount }
    }
}
impl Display for VisAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.amount, self.art)
    }
}

/// Vis gained or spent in a given season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct VisTransaction {
    pub season: OrCustom<Season>,
    pub year: i64,
    pub amounts: Vec<VisAmount>,
    pub description: Option<String>,
    /// Last year of a recurring source (e.g. a yearly harvest).
    pub year_end: Option<i64>,
    pub owner: Option<String>,
}
impl VisTransaction {
    /// The season this transaction happens in, when both the season and the
    /// year are regular.
    pub fn when(&self) -> Option<YearSeason> {
        let season = *self.season.known()?;
        YearSeason::try_new(self.year, season).ok()
    }

    /// Net pawns of `art` moved by this transaction.
    pub fn total(&self, art: Art) -> i64 {
        self.amounts.iter().filter(|a| a.art.known() == Some(&art)).map(|a| a.amount).sum()
    }
}
