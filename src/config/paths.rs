//! Path management for the buyback wizard
//!
//! ## Path Resolution Order
//!
//! 1. `BUYBACK_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `buyback-cli`
//!    (`~/.config/buyback-cli` on Linux, `%APPDATA%\buyback-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BuybackError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUYBACK_CLI_DATA_DIR";

/// Manages all paths used by the wizard
#[derive(Debug, Clone)]
pub struct BuybackPaths {
    base_dir: PathBuf,
}

impl BuybackPaths {
    /// Create a new BuybackPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, BuybackError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BuybackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Key/value file backing the wizard progress store
    pub fn progress_file(&self) -> PathBuf {
        self.data_dir().join("progress.json")
    }

    /// Document store used by the file submission sink
    pub fn submissions_file(&self) -> PathBuf {
        self.data_dir().join("sell_requests.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BuybackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BuybackError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BuybackError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the wizard has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BuybackError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BuybackError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("buyback-cli"))
}
