//! Path management for budget-insights
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_INSIGHTS_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/budget-insights` or `~/.config/budget-insights`
//! 3. Windows: `%APPDATA%\budget-insights`

use std::path::PathBuf;

use crate::error::{InsightsError, InsightsResult};

/// Environment variable overriding the base directory
pub const BASE_DIR_ENV: &str = "BUDGET_INSIGHTS_DIR";

/// Manages all paths used by budget-insights
#[derive(Debug, Clone)]
pub struct InsightsPaths {
    base_dir: PathBuf,
}

impl InsightsPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home/config directory
    /// can be determined.
    pub fn new() -> InsightsResult<Self> {
        let base_dir = match std::env::var(BASE_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/budget-insights/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/budget-insights/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default ledger snapshot location
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> InsightsResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| InsightsError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| InsightsError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> InsightsResult<PathBuf> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                InsightsError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("budget-insights"))
}

#[cfg(windows)]
fn resolve_default_path() -> InsightsResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| InsightsError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("budget-insights"))
}
