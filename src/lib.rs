//! buyback-cli - multi-step sell wizard for used devices
//!
//! Leads a seller through a linear wizard that collects one section of a
//! sell request per step, estimates an offer, records its acceptance and
//! hands the finished request to a submission sink. Progress is persisted
//! between invocations through a key/value storage port.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: custom error types
//! - `models`: device vocabularies, the sectioned payload, submissions
//! - `storage`: atomic JSON files, the key/value port, the request store
//! - `audit`: append-only log of wizard events
//! - `pricing`: the offer estimator and the optional remote price table
//! - `sink`: submission backends
//! - `wizard`: the step-state machine
//! - `steps`: per-step validation and completion
//! - `display`, `cli`: terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use buyback::storage::MemoryStore;
//! use buyback::wizard::WizardController;
//!
//! let mut wizard = WizardController::restore(MemoryStore::new());
//! wizard.advance()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod pricing;
pub mod sink;
pub mod steps;
pub mod storage;
pub mod wizard;

#[cfg(test)]
mod test_support;

pub use error::{BuybackError, BuybackResult};
