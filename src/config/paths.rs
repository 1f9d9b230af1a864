//! Path management for finboard
//!
//! Only configuration lives on disk; records are held in memory for the
//! session and never written here.
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOARD_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory joined with `finboard`
//!    (`$XDG_CONFIG_HOME/finboard` or `~/.config/finboard` on Unix,
//!    `%APPDATA%\finboard` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FinboardError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "FINBOARD_CONFIG_DIR";

/// Manages all paths used by finboard
#[derive(Debug, Clone)]
pub struct FinboardPaths {
    base_dir: PathBuf,
}

impl FinboardPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform has no
    /// discoverable home directory.
    pub fn new() -> Result<Self, FinboardError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), FinboardError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FinboardError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FinboardError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| FinboardError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("finboard"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("finboard");
        let paths = FinboardPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
