//! Sell wizard state machine
//!
//! A strictly linear sequence of steps. The controller advances and
//! retreats one step at a time, merges section patches into the payload and
//! persists everything through a `KeyValueStore`.

pub mod controller;
pub mod persistence;
pub mod state;
pub mod step;

pub use controller::WizardController;
pub use state::WizardState;
pub use step::Step;
