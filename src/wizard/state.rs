//! Wizard state: the current step plus the accumulated payload

use crate::models::SectionedFormData;

use super::step::Step;

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub current_step: Step,
    pub payload: SectionedFormData,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: Step::first(),
            payload: SectionedFormData::default(),
        }
    }
}

impl WizardState {
    /// Step 0 with every section empty
    pub fn is_fresh(&self) -> bool {
        self.current_step == Step::first() && self.payload.is_empty()
    }
}
