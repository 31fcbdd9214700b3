//! CLI command handlers
//!
//! Bridges clap argument parsing with the wizard, pricing and audit layers.

pub mod estimate;
pub mod history;
pub mod sell;

pub use estimate::{handle_estimate_command, EstimateArgs};
pub use history::handle_history_command;
pub use sell::{handle_sell_command, OutputFormat, SellCommands};
