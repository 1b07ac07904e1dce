//! Locales, regions, and the fixed mapping between them.
//!
//! RULE: Region and locale are always paired 1:1.
//!   Poland  <-> pl
//!   USA     <-> en
//!   Georgia <-> ka

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Pl,
    En,
    Ka,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Pl, Locale::En, Locale::Ka];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Pl => "pl",
            Self::En => "en",
            Self::Ka => "ka",
        }
    }

    pub fn region(&self) -> Region {
        match self {
            Self::Pl => Region::Poland,
            Self::En => Region::Usa,
            Self::Ka => Region::Georgia,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = FeedError;

    fn from_str(s: &str) -> FeedResult<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| FeedError::config(format!("unsupported locale '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    Poland,
    #[serde(rename = "USA")]
    Usa,
    Georgia,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Poland, Region::Usa, Region::Georgia];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Poland => "Poland",
            Self::Usa => "USA",
            Self::Georgia => "Georgia",
        }
    }

    pub fn locale(&self) -> Locale {
        match self {
            Self::Poland => Locale::Pl,
            Self::Usa => Locale::En,
            Self::Georgia => Locale::Ka,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = FeedError;

    fn from_str(s: &str) -> FeedResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FeedError::config(format!("unsupported region '{s}'")))
    }
}

/// Check that a locale/region pair is part of the fixed mapping.
pub fn ensure_paired(locale: Locale, region: Region) -> FeedResult<()> {
    if region.locale() == locale {
        Ok(())
    } else {
        Err(FeedError::config(format!(
            "region {region} is paired with locale {}, not {locale}",
            region.locale()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_round_trips() {
        for region in Region::ALL {
            assert_eq!(region.locale().region(), region);
        }
    }

    #[test]
    fn parses_display_names() {
        assert_eq!("Poland".parse::<Region>().unwrap(), Region::Poland);
        assert_eq!("usa".parse::<Region>().unwrap(), Region::Usa);
        assert_eq!("ka".parse::<Locale>().unwrap(), Locale::Ka);
        assert!("Narnia".parse::<Region>().is_err());
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn mismatched_pair_is_config_error() {
        let err = ensure_paired(Locale::En, Region::Poland).unwrap_err();
        assert!(matches!(err, FeedError::Config { .. }), "got {err:?}");
        assert!(ensure_paired(Locale::Pl, Region::Poland).is_ok());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Region::Usa).unwrap();
        assert_eq!(json, "\"USA\"");
        let locale: Locale = serde_json::from_str("\"pl\"").unwrap();
        assert_eq!(locale, Locale::Pl);
    }
}
