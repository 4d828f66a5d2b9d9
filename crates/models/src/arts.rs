//! Hermetic Arts: the five Techniques and ten Forms.
//!
//! Every Art parses case-insensitively from its Latin name or its customary
//! two-letter abbreviation (`"Cr"`, `"Vi"`, ...).

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::category::{Category, category_impls};
use crate::error::{Error, ErrorKind};

/// Hermetic Techniques, the verbs of spellcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub enum HermeticTechnique {
    Creo,
    Intellego,
    Muto,
    Perdo,
    Rego,
}
impl Category for HermeticTechnique {
    const NAME: &'static str = "hermetic technique";
    const ALL: &'static [Self] = &[Self::Creo, Self::Intellego, Self::Muto, Self::Perdo, Self::Rego];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Creo => "creo",
            Self::Intellego => "intellego",
            Self::Muto => "muto",
            Self::Perdo => "perdo",
            Self::Rego => "rego",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Creo => &["cr"],
            Self::Intellego => &["in"],
            Self::Muto => &["mu"],
            Self::Perdo => &["pe"],
            Self::Rego => &["re"],
        }
    }
}
category_impls!(HermeticTechnique);

/// Hermetic Forms, the nouns of spellcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub enum HermeticForm {
    Animal,
    Aquam,
    Auram,
    Corpus,
    Herbam,
    Ignem,
    Imaginem,
    Mentem,
    Terram,
    Vim,
}
impl Category for HermeticForm {
    const NAME: &'static str = "hermetic form";
    const ALL: &'static [Self] = &[
        Self::Animal,
        Self::Aquam,
        Self::Auram,
        Self::Corpus,
        Self::Herbam,
        Self::Ignem,
        Self::Imaginem,
        Self::Mentem,
        Self::Terram,
        Self::Vim,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Aquam => "aquam",
            Self::Auram => "auram",
            Self::Corpus => "corpus",
            Self::Herbam => "herbam",
            Self::Ignem => "ignem",
            Self::Imaginem => "imaginem",
            Self::Mentem => "mentem",
            Self::Terram => "terram",
            Self::Vim => "vim",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Animal => &["an"],
            Self::Aquam => &["aq"],
            Self::Auram => &["au"],
            Self::Corpus => &["co"],
            Self::Herbam => &["he"],
            Self::Ignem => &["ig"],
            Self::Imaginem => &["im"],
            Self::Mentem => &["me"],
            Self::Terram => &["te"],
            Self::Vim => &["vi"],
        }
    }
}
category_impls!(HermeticForm);

/// Any Hermetic Art, Technique or Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub enum Art {
    Technique(HermeticTechnique),
    Form(HermeticForm),
}
impl Art {
    /// Canonical lowercase name of the underlying Technique or Form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technique(t) => t.as_str(),
            Self::Form(f) => f.as_str(),
        }
    }
}
impl From<HermeticTechnique> for Art {
    fn from(value: HermeticTechnique) -> Self {
        Self::Technique(value)
    }
}
impl From<HermeticForm> for Art {
    fn from(value: HermeticForm) -> Self {
        Self::Form(value)
    }
}
impl From<Art> for String {
    fn from(value: Art) -> Self {
        value.as_str().to_string()
    }
}
impl FromStr for Art {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Names and aliases of Techniques and Forms never overlap.
        if let Ok(technique) = s.parse::<HermeticTechnique>() {
            return Ok(Self::Technique(technique));
        }
        match s.parse::<HermeticForm>() {
            Ok(form) => Ok(Self::Form(form)),
            Err(_) => exn::bail!(ErrorKind::UnknownCategoryValue { category: "art", value: s.to_string() }),
        }
    }
}
impl TryFrom<String> for Art {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl Display for Art {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn title_case(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    #[rstest]
    #[case("creo", "cr", HermeticTechnique::Creo)]
    #[case("intellego", "in", HermeticTechnique::Intellego)]
    #[case("muto", "mu", HermeticTechnique::Muto)]
    #[case("perdo", "pe", HermeticTechnique::Perdo)]
    #[case("rego", "re", HermeticTechnique::Rego)]
    fn test_hermetic_techniques(#[case] name: &str, #[case] alias: &str, #[case] expected: HermeticTechnique) {
        for input in [name.to_string(), title_case(name), name.to_uppercase(), alias.to_string(), title_case(alias)] {
            assert_eq!(input.parse::<HermeticTechnique>().unwrap(), expected, "{input}");
            assert_eq!(input.parse::<Art>().unwrap(), Art::Technique(expected), "{input}");
        }
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("animal", "an", HermeticForm::Animal)]
    #[case("aquam", "aq", HermeticForm::Aquam)]
    #[case("auram", "au", HermeticForm::Auram)]
    #[case("corpus", "co", HermeticForm::Corpus)]
    #[case("herbam", "he", HermeticForm::Herbam)]
    #[case("ignem", "ig", HermeticForm::Ignem)]
    #[case("imaginem", "im", HermeticForm::Imaginem)]
    #[case("mentem", "me", HermeticForm::Mentem)]
    #[case("terram", "te", HermeticForm::Terram)]
    #[case("vim", "vi", HermeticForm::Vim)]
    fn test_hermetic_forms(#[case] name: &str, #[case] alias: &str, #[case] expected: HermeticForm) {
        for input in [name.to_string(), title_case(name), name.to_uppercase(), alias.to_string(), alias.to_uppercase()] {
            assert_eq!(input.parse::<HermeticForm>().unwrap(), expected, "{input}");
            assert_eq!(input.parse::<Art>().unwrap(), Art::Form(expected), "{input}");
        }
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("")]
    #[case("cre")]
    #[case("vis")]
    #[case("ignis")]
    fn test_art_from_str_invalid(#[case] test: &str) {
        let err = test.parse::<Art>().unwrap_err();
        assert_eq!(*err, ErrorKind::UnknownCategoryValue { category: "art", value: test.to_string() });
    }

    #[test]
    fn test_techniques_are_not_forms() {
        assert!("creo".parse::<HermeticForm>().is_err());
        assert!("vim".parse::<HermeticTechnique>().is_err());
    }

    #[test]
    fn test_names_and_aliases_are_disjoint() {
        let mut seen = HashSet::new();
        for technique in HermeticTechnique::ALL {
            assert!(seen.insert(technique.as_str()));
            for alias in technique.aliases() {
                assert!(seen.insert(*alias));
            }
        }
        for form in HermeticForm::ALL {
            assert!(seen.insert(form.as_str()));
            for alias in form.aliases() {
                assert!(seen.insert(*alias));
            }
        }
    }

    #[test]
    fn test_by_rank_bypasses_aliases() {
        assert_eq!(HermeticTechnique::try_from(0u8).unwrap(), HermeticTechnique::Creo);
        assert_eq!(HermeticForm::try_from(9u8).unwrap(), HermeticForm::Vim);
        assert!(HermeticForm::try_from(10u8).is_err());
    }
}
