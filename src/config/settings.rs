//! User settings for finboard
//!
//! Manages display and default-criteria preferences. Settings are the only
//! state read from disk.

use serde::{Deserialize, Serialize};

use super::paths::FinboardPaths;
use crate::error::FinboardError;

/// User settings for finboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date display format (strftime); interchange always uses ISO dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Sort key applied when none is given
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Date range applied when none is given
    #[serde(default = "default_range")]
    pub default_range: String,

    /// How many categories the spending breakdown shows
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Log filter used when `FINBOARD_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_sort() -> String {
    "date-desc".to_string()
}

fn default_range() -> String {
    "all".to_string()
}

fn default_top_categories() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_sort: default_sort(),
            default_range: default_range(),
            top_categories: default_top_categories(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinboardPaths) -> Result<Self, FinboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinboardPaths) -> Result<(), FinboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinboardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
