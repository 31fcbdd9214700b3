//! Display formatting for terminal output

pub mod history;
pub mod wizard;

pub use history::format_history;
pub use wizard::{format_money, format_progress, format_quote, format_review};
