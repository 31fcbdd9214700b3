//! Configuration module for the buyback wizard
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (pricing source, submission sink)

pub mod paths;
pub mod settings;

pub use paths::BuybackPaths;
pub use settings::{PricingSettings, Settings, SinkKind, SubmissionSettings};
