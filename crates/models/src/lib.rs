//! Domain models for Ars Magica 5th edition bookkeeping.
//!
//! - [`arts`]: the Hermetic Arts, parsed from names or two-letter
//!   abbreviations in any case.
//! - [`flags`]: combinable sets of Arts, parsed from unambiguous prefixes.
//! - [`times`]: seasons, positions within the saga, and ranges of them.
//! - [`vis`]: vis amounts and transactions.

pub mod arts;
pub mod category;
pub mod error;
pub mod flags;
pub mod quote;
pub mod times;
pub mod vis;

pub use crate::arts::{Art, HermeticForm, HermeticTechnique};
pub use crate::category::Category;
pub use crate::flags::{Forms, Techniques};
pub use crate::times::{Season, Year, YearSeason};
pub use crate::vis::{OrCustom, VisAmount, VisTransaction};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn categories_use_canonical_names() {
        assert_eq!(serde_json::to_string(&Season::Autumn).unwrap(), "\"autumn\"");
        assert_eq!(serde_json::from_str::<Season>("\"Fall\"").unwrap(), Season::Autumn);
        assert_eq!(serde_json::from_str::<Art>("\"cr\"").unwrap(), Art::Technique(HermeticTechnique::Creo));
        assert!(serde_json::from_str::<HermeticForm>("\"creo\"").is_err());
    }

    #[test]
    fn year_season_round_trip() {
        let at = YearSeason::try_new(1220, Season::Winter).unwrap();
        let json = serde_json::to_string(&at).unwrap();
        assert_eq!(json, r#"{"year":1220,"season":"winter"}"#);
        assert_eq!(serde_json::from_str::<YearSeason>(&json).unwrap(), at);
    }
}
