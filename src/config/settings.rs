//! User settings for budget-insights
//!
//! Report sizes and display preferences, persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::InsightsPaths;
use crate::error::{InsightsError, InsightsResult};
use crate::reports::{DEFAULT_HOTSPOT_COUNT, DEFAULT_RECENT_COUNT, DEFAULT_TREND_WINDOW};

/// User settings for budget-insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of hotspots per kind
    #[serde(default = "default_hotspot_count")]
    pub hotspot_count: usize,

    /// Number of periods in a trend window
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Number of transactions listed on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_transaction_count: usize,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_hotspot_count() -> usize {
    DEFAULT_HOTSPOT_COUNT
}

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            hotspot_count: default_hotspot_count(),
            trend_window: default_trend_window(),
            recent_transaction_count: default_recent_count(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &InsightsPaths) -> InsightsResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| InsightsError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| InsightsError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &InsightsPaths) -> InsightsResult<()> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| InsightsError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| InsightsError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the engine cannot honor
    pub fn validate(&self) -> InsightsResult<()> {
        if self.trend_window == 0 {
            return Err(InsightsError::Config(
                "trend_window must be at least 1".into(),
            ));
        }
        if self.currency_symbol.chars().count() > 4 {
            return Err(InsightsError::Config(format!(
                "currency_symbol '{}' is too long",
                self.currency_symbol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.hotspot_count, 3);
        assert_eq!(settings.trend_window, 3);
        assert_eq!(settings.recent_transaction_count, 3);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InsightsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InsightsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            hotspot_count: 5,
            trend_window: 6,
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InsightsPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"trend_window": 12}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.trend_window, 12);
        assert_eq!(loaded.hotspot_count, 3);
    }

    #[test]
    fn test_zero_trend_window_rejected() {
        let settings = Settings {
            trend_window: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(InsightsError::Config(_))));

        let temp_dir = TempDir::new().unwrap();
        let paths = InsightsPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"trend_window": 0}"#).unwrap();
        assert!(Settings::load_or_create(&paths).is_err());
    }
}
