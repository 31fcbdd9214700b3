//! User settings for the buyback wizard
//!
//! Manages display preferences, the remote price table, and which submission
//! sink receives finished payloads.

use serde::{Deserialize, Serialize};

use super::paths::BuybackPaths;
use crate::error::BuybackError;

/// Which backend receives submitted payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Local JSON document store (default)
    #[default]
    File,
    /// Remote JSON endpoint
    Http,
}

/// Price estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// URL of a brand -> model -> base price table; device-type bases are used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_table_url: Option<String>,

    /// Base price used when the remote table cannot be fetched
    #[serde(default = "default_fallback_base_price")]
    pub fallback_base_price: i64,

    /// Request timeout for the price table, in seconds
    #[serde(default = "default_pricing_timeout")]
    pub timeout_secs: u64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            price_table_url: None,
            fallback_base_price: default_fallback_base_price(),
            timeout_secs: default_pricing_timeout(),
        }
    }
}

/// Submission sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSettings {
    #[serde(default)]
    pub sink: SinkKind,

    /// Endpoint receiving POSTed documents (required for the http sink)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default = "default_submission_timeout")]
    pub timeout_secs: u64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            endpoint: None,
            timeout_secs: default_submission_timeout(),
        }
    }
}

/// User settings for the buyback wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when showing offers
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether wizard events are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub submission: SubmissionSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_fallback_base_price() -> i64 {
    500
}

fn default_pricing_timeout() -> u64 {
    10
}

fn default_submission_timeout() -> u64 {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            audit_enabled: default_audit_enabled(),
            pricing: PricingSettings::default(),
            submission: SubmissionSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BuybackPaths) -> Result<Self, BuybackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BuybackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BuybackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BuybackPaths) -> Result<(), BuybackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BuybackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BuybackError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), BuybackError> {
        if self.submission.sink == SinkKind::Http
            && self
                .submission
                .endpoint
                .as_deref()
                .map_or(true, |e| e.trim().is_empty())
        {
            return Err(BuybackError::Config(
                "submission.endpoint is required when submission.sink is \"http\"".into(),
            ));
        }

        if self.pricing.fallback_base_price < 0 {
            return Err(BuybackError::Config(
                "pricing.fallback_base_price cannot be negative".into(),
            ));
        }

        Ok(())
    }
}
