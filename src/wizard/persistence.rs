//! Mapping between `WizardState` and the key/value storage port
//!
//! Two keys are used: `sellFormData` holds the JSON payload and
//! `currentStep` the stringified step index.

use crate::error::BuybackResult;
use crate::models::SectionedFormData;
use crate::storage::KeyValueStore;

use super::state::WizardState;
use super::step::Step;

pub const FORM_DATA_KEY: &str = "sellFormData";
pub const CURRENT_STEP_KEY: &str = "currentStep";

/// Outcome of reading persisted state
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// Nothing stored
    Empty,
    Restored(WizardState),
    /// Stored data was unusable
    Invalid(String),
}

/// Read both keys; any unreadable or malformed value invalidates the whole state
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Loaded {
    let form_data = match store.get(FORM_DATA_KEY) {
        Ok(v) => v,
        Err(e) => return Loaded::Invalid(e.to_string()),
    };
    let current_step = match store.get(CURRENT_STEP_KEY) {
        Ok(v) => v,
        Err(e) => return Loaded::Invalid(e.to_string()),
    };

    if form_data.is_none() && current_step.is_none() {
        return Loaded::Empty;
    }

    let payload = match form_data {
        Some(raw) => match serde_json::from_str::<SectionedFormData>(&raw) {
            Ok(payload) => payload,
            Err(e) => return Loaded::Invalid(format!("{} is malformed: {}", FORM_DATA_KEY, e)),
        },
        None => SectionedFormData::default(),
    };

    let current_step = match current_step {
        Some(raw) => match raw.trim().parse::<usize>().ok().and_then(Step::from_index) {
            Some(step) => step,
            None => {
                return Loaded::Invalid(format!("{} is out of range: '{}'", CURRENT_STEP_KEY, raw))
            }
        },
        None => Step::first(),
    };

    Loaded::Restored(WizardState {
        current_step,
        payload,
    })
}

pub fn save_step<S: KeyValueStore + ?Sized>(store: &mut S, step: Step) -> BuybackResult<()> {
    store.set(CURRENT_STEP_KEY, &step.index().to_string())
}

/// Write both keys in one batch
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, state: &WizardState) -> BuybackResult<()> {
    let json = serde_json::to_string(&state.payload)?;
    let step = state.current_step.index().to_string();
    store.set_many(&[(FORM_DATA_KEY, json.as_str()), (CURRENT_STEP_KEY, step.as_str())])
}

/// Remove both keys in one batch
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> BuybackResult<()> {
    store.remove_many(&[FORM_DATA_KEY, CURRENT_STEP_KEY])
}
