use crate::{
    error::{FeedError, FeedResult},
    locale::{ensure_paired, Locale, Region},
    types::{ErrorIntensity, MAX_ERROR_INTENSITY},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Generation config ──────────────────────────────────────────────

/// What to generate. Any change to these fields restarts the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationConfig {
    pub locale: Locale,
    pub region: Region,
    pub error_intensity: ErrorIntensity,
    pub seed: String,
    /// Optional hard cap on the number of records. `None` = unbounded.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl GenerationConfig {
    /// Build a config for `region`, deriving the locale from the fixed mapping.
    pub fn for_region(region: Region, error_intensity: ErrorIntensity, seed: impl Into<String>) -> Self {
        Self {
            locale: region.locale(),
            region,
            error_intensity,
            seed: seed.into(),
            total_count: None,
        }
    }

    pub fn with_total_count(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    pub fn validate(&self) -> FeedResult<()> {
        ensure_paired(self.locale, self.region)?;
        if self.error_intensity > MAX_ERROR_INTENSITY {
            return Err(FeedError::config(format!(
                "error_intensity {} outside 0..={MAX_ERROR_INTENSITY}",
                self.error_intensity
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_region(Region::Poland, 0, "")
    }
}

// ── Feed settings ──────────────────────────────────────────────────

/// How the error intensity knob is interpreted by the noise injector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Exactly one edit per field, whatever the intensity.
    #[default]
    SingleEdit,
    /// `intensity` independent edits per field; 0 leaves the field clean.
    Scaled,
}

/// Shape of the feed itself. Stable across reconfigurations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedSettings {
    pub initial_page_size: usize,
    pub page_size: usize,
    pub noise_mode: NoiseMode,
    pub identifier_len: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            initial_page_size: 20,
            page_size: 10,
            noise_mode: NoiseMode::SingleEdit,
            identifier_len: 8,
        }
    }
}

impl FeedSettings {
    /// Load settings from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings: FeedSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        log::debug!("Loaded feed settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.initial_page_size == 0 || self.page_size == 0 {
            return Err(FeedError::config("page sizes must be > 0"));
        }
        if self.identifier_len == 0 {
            return Err(FeedError::config("identifier_len must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_region_keeps_mapping() {
        let cfg = GenerationConfig::for_region(Region::Georgia, 4, "seed");
        assert_eq!(cfg.locale, Locale::Ka);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn intensity_bounds_are_inclusive() {
        assert!(GenerationConfig::for_region(Region::Usa, 0, "s").validate().is_ok());
        assert!(GenerationConfig::for_region(Region::Usa, 10, "s").validate().is_ok());
        let err = GenerationConfig::for_region(Region::Usa, 11, "s").validate().unwrap_err();
        assert!(matches!(err, FeedError::Config { .. }));
    }

    #[test]
    fn mismatched_locale_rejected() {
        let mut cfg = GenerationConfig::for_region(Region::Usa, 1, "s");
        cfg.locale = Locale::Ka;
        assert!(matches!(cfg.validate(), Err(FeedError::Config { .. })));
    }

    #[test]
    fn settings_fill_missing_fields() {
        let settings: FeedSettings = serde_json::from_str(r#"{"page_size": 5}"#).unwrap();
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.initial_page_size, 20);
        assert_eq!(settings.noise_mode, NoiseMode::SingleEdit);
    }

    #[test]
    fn settings_load_from_file() {
        let path = std::env::temp_dir().join(format!("typofeed-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"initial_page_size": 3, "noise_mode": "scaled"}"#).unwrap();
        let settings = FeedSettings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.initial_page_size, 3);
        assert_eq!(settings.noise_mode, NoiseMode::Scaled);
    }

    #[test]
    fn zero_page_size_rejected() {
        let settings = FeedSettings { page_size: 0, ..FeedSettings::default() };
        assert!(matches!(settings.validate(), Err(FeedError::Config { .. })));
    }

    #[test]
    fn zero_identifier_len_rejected() {
        let settings = FeedSettings { identifier_len: 0, ..FeedSettings::default() };
        assert!(matches!(settings.validate(), Err(FeedError::Config { .. })));

        let loaded: FeedSettings = serde_json::from_str(r#"{"identifier_len": 0}"#).unwrap();
        assert!(loaded.validate().is_err());
        assert!(FeedSettings { identifier_len: 1, ..FeedSettings::default() }.validate().is_ok());
    }
}
