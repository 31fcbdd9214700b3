//! Step components
//!
//! Each step validates its own section. `complete` merges a patch into a
//! copy of the current step's section, validates the result, and only then
//! commits it to the wizard and advances. `back` moves to the previous step.

pub mod delivery;
pub mod device_details;
pub mod device_selection;
pub mod identity;
pub mod price_review;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{BuybackError, BuybackResult};
use crate::models::{SectionPatch, SectionedFormData};
use crate::pricing::PriceQuoter;
use crate::storage::KeyValueStore;
use crate::wizard::{Step, WizardController};

/// Inputs the steps need beyond the payload itself
pub struct StepContext {
    pub today: NaiveDate,
    pub quoter: PriceQuoter,
}

impl StepContext {
    pub fn new(quoter: PriceQuoter) -> Self {
        Self {
            today: Local::now().date_naive(),
            quoter,
        }
    }

    /// Context pinned to a given date
    pub fn with_today(quoter: PriceQuoter, today: NaiveDate) -> Self {
        Self { today, quoter }
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// Require a non-blank text field
pub(crate) fn required_text<'a>(value: &'a Option<String>, field: &str) -> BuybackResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BuybackError::missing_field(field)),
    }
}

fn invalid_step(step: Step, reason: impl Into<String>) -> BuybackError {
    BuybackError::InvalidStep {
        step: step.title().to_string(),
        reason: reason.into(),
    }
}

/// Validate `patch` against the current step, then commit it and advance
///
/// The merged section and the new step are persisted in one write, so on
/// any error the wizard state is left unchanged.
pub fn complete<S: KeyValueStore>(
    wizard: &mut WizardController<S>,
    patch: SectionPatch,
    ctx: &StepContext,
) -> BuybackResult<Step> {
    let step = wizard.current_step();
    let Some(expected) = step.section() else {
        return Err(invalid_step(step, "the review step is completed by submitting"));
    };
    if patch.section() != expected {
        return Err(invalid_step(
            step,
            format!("expected {} fields, got {}", expected, patch.section()),
        ));
    }

    let payload = wizard.payload();
    let patch = match patch {
        SectionPatch::DeviceSelection(p) => {
            device_selection::validate(&payload.device_selection.merged(&p))?;
            SectionPatch::DeviceSelection(p)
        }
        SectionPatch::DeviceDetails(p) => {
            device_details::validate(&payload.device_details.merged(&p), ctx.current_year())?;
            SectionPatch::DeviceDetails(p)
        }
        SectionPatch::Delivery(p) => {
            delivery::validate(&payload.delivery.merged(&p), ctx.today)?;
            SectionPatch::Delivery(p)
        }
        SectionPatch::Identity(p) => {
            identity::validate(&payload.identity.merged(&p))?;
            SectionPatch::Identity(p)
        }
        SectionPatch::Price(p) => SectionPatch::Price(price_review::accept(payload, &p, ctx)?),
    };

    wizard.update_and_advance(patch)
}

/// Check every section as the steps would
///
/// Used before submitting, since `advance` alone skips step validation.
pub fn validate_all(payload: &SectionedFormData, ctx: &StepContext) -> BuybackResult<()> {
    device_selection::validate(&payload.device_selection)?;
    device_details::validate(&payload.device_details, ctx.current_year())?;
    delivery::validate(&payload.delivery, ctx.today)?;
    identity::validate(&payload.identity)?;
    price_review::validate_current(payload)
}

/// Go back one step; rejected on the first step
pub fn back<S: KeyValueStore>(wizard: &mut WizardController<S>) -> BuybackResult<Step> {
    let step = wizard.current_step();
    if step == Step::first() {
        return Err(invalid_step(step, "already at the first step"));
    }
    wizard.retreat()?;
    Ok(wizard.current_step())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, SectionName};
    use crate::storage::MemoryStore;
    use crate::wizard::persistence::{CURRENT_STEP_KEY, FORM_DATA_KEY};
    use std::path::Path;
    use tempfile::TempDir;

    /// Store that refuses any write moving `currentStep` off its stored value
    #[derive(Default)]
    struct StuckStepStore(MemoryStore);

    impl StuckStepStore {
        fn check(&self, entries: &[(&str, &str)]) -> BuybackResult<()> {
            let stored = self.0.get(CURRENT_STEP_KEY)?.unwrap_or_else(|| "0".into());
            if entries.iter().any(|(k, v)| *k == CURRENT_STEP_KEY && *v != stored) {
                return Err(BuybackError::Storage("step is locked".into()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for StuckStepStore {
        fn get(&self, key: &str) -> BuybackResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> BuybackResult<()> {
            self.check(&[(key, value)])?;
            self.0.set(key, value)
        }
        fn remove(&mut self, key: &str) -> BuybackResult<()> {
            self.0.remove(key)
        }
        fn set_many(&mut self, entries: &[(&str, &str)]) -> BuybackResult<()> {
            self.check(entries)?;
            self.0.set_many(entries)
        }
        fn remove_many(&mut self, keys: &[&str]) -> BuybackResult<()> {
            self.0.remove_many(keys)
        }
    }

    fn ctx() -> StepContext {
        StepContext::with_today(PriceQuoter::offline(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn patch(section: SectionName, fields: &[(&str, &str)]) -> SectionPatch {
        SectionPatch::from_fields(section, fields.iter().copied()).unwrap()
    }

    fn id_image(dir: &Path) -> String {
        let path = dir.join("id.png");
        std::fs::write(&path, b"png").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn walk_to_price_review(wizard: &mut WizardController<MemoryStore>, dir: &Path) {
        let ctx = ctx();
        let image = id_image(dir);
        complete(wizard, patch(SectionName::DeviceSelection, &[("deviceType", "Smartphone")]), &ctx).unwrap();
        complete(
            wizard,
            patch(
                SectionName::DeviceDetails,
                &[
                    ("brand", "Apple"),
                    ("model", "iPhone 12"),
                    ("purchaseYear", "2026"),
                    ("condition", "used"),
                    ("storage", "128GB"),
                ],
            ),
            &ctx,
        )
        .unwrap();
        complete(wizard, patch(SectionName::Delivery, &[("method", "parcel")]), &ctx).unwrap();
        complete(
            wizard,
            patch(
                SectionName::Identity,
                &[
                    ("fullName", "Sam Seller"),
                    ("idType", "passport"),
                    ("idNumber", "P1234567"),
                    ("cnic", "12345-1234567-1"),
                    ("email", "sam@example.com"),
                    ("phone", "+92 300 1234567"),
                    ("idImage", image.as_str()),
                    ("termsAgreed", "yes"),
                ],
            ),
            &ctx,
        )
        .unwrap();
    }

    #[test]
    fn test_complete_advances() {
        let mut wizard = WizardController::restore(MemoryStore::new());
        let step = complete(
            &mut wizard,
            patch(SectionName::DeviceSelection, &[("deviceType", "Laptop")]),
            &ctx(),
        )
        .unwrap();

        assert_eq!(step, Step::DeviceDetails);
        assert!(wizard.payload().device_selection.device_type.is_some());
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let mut wizard = WizardController::restore(MemoryStore::new());
        wizard.advance().unwrap();
        let before = wizard.state().clone();

        let err = complete(
            &mut wizard,
            patch(SectionName::DeviceDetails, &[("brand", "Apple"), ("purchaseYear", "1980")]),
            &ctx(),
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn test_failed_step_write_keeps_section_uncommitted() {
        let mut wizard = WizardController::restore(StuckStepStore::default());

        // Drafts at the current step still save
        wizard
            .update_section(patch(SectionName::DeviceSelection, &[("deviceType", "Tablet")]))
            .unwrap();
        let before = wizard.state().clone();
        let stored = wizard.store().get(FORM_DATA_KEY).unwrap();

        let err = complete(
            &mut wizard,
            patch(SectionName::DeviceSelection, &[("deviceType", "Laptop")]),
            &ctx(),
        )
        .unwrap_err();

        assert!(matches!(err, BuybackError::Storage(_)));
        assert_eq!(wizard.state(), &before);
        assert_eq!(wizard.store().get(FORM_DATA_KEY).unwrap(), stored);
    }

    #[test]
    fn test_validate_all_rejects_stale_offer() {
        let temp_dir = TempDir::new().unwrap();
        let mut wizard = WizardController::restore(MemoryStore::new());
        walk_to_price_review(&mut wizard, temp_dir.path());
        complete(&mut wizard, patch(SectionName::Price, &[("payout", "paypal")]), &ctx()).unwrap();
        assert_eq!(wizard.current_step(), Step::Review);

        wizard
            .update_section(patch(
                SectionName::DeviceDetails,
                &[("condition", "new"), ("storage", "1TB")],
            ))
            .unwrap();

        assert_eq!(wizard.payload().price.estimated_price, Some(250));
        assert_eq!(price_review::offer(wizard.payload(), &ctx()).unwrap().price, 500);
        assert!(validate_all(wizard.payload(), &ctx()).is_err());
    }

    #[test]
    fn test_patch_for_other_section_rejected() {
        let mut wizard = WizardController::restore(MemoryStore::new());
        let err = complete(&mut wizard, patch(SectionName::Delivery, &[("method", "pickup")]), &ctx())
            .unwrap_err();

        assert!(matches!(err, BuybackError::InvalidStep { .. }));
        assert!(wizard.state().is_fresh());
    }

    #[test]
    fn test_earlier_draft_fields_count_toward_validation() {
        let mut wizard = WizardController::restore(MemoryStore::new());
        wizard.advance().unwrap();
        wizard
            .update_section(patch(
                SectionName::DeviceDetails,
                &[("brand", "Apple"), ("model", "X"), ("condition", "fair")],
            ))
            .unwrap();

        let step = complete(
            &mut wizard,
            patch(SectionName::DeviceDetails, &[("year", "2024"), ("storage", "64GB")]),
            &ctx(),
        )
        .unwrap();
        assert_eq!(step, Step::Delivery);
    }

    #[test]
    fn test_price_review_accepts_offer() {
        let temp_dir = TempDir::new().unwrap();
        let mut wizard = WizardController::restore(MemoryStore::new());
        walk_to_price_review(&mut wizard, temp_dir.path());
        assert_eq!(wizard.current_step(), Step::PriceReview);

        let step = complete(&mut wizard, patch(SectionName::Price, &[("payout", "paypal")]), &ctx()).unwrap();
        assert_eq!(step, Step::Review);

        let price = &wizard.payload().price;
        assert_eq!(price.estimated_price, Some(250));
        assert_eq!(price.accepted, Some(true));
        assert_eq!(price.status, Some(ApprovalStatus::PendingReview));
    }

    #[test]
    fn test_validate_all() {
        let temp_dir = TempDir::new().unwrap();
        let mut wizard = WizardController::restore(MemoryStore::new());
        walk_to_price_review(&mut wizard, temp_dir.path());
        assert!(validate_all(wizard.payload(), &ctx()).is_err());

        complete(&mut wizard, patch(SectionName::Price, &[("payout", "paypal")]), &ctx()).unwrap();
        assert!(validate_all(wizard.payload(), &ctx()).is_ok());
    }

    #[test]
    fn test_review_step_cannot_be_completed() {
        let temp_dir = TempDir::new().unwrap();
        let mut wizard = WizardController::restore(MemoryStore::new());
        walk_to_price_review(&mut wizard, temp_dir.path());
        complete(&mut wizard, patch(SectionName::Price, &[("payout", "bank")]), &ctx()).unwrap();

        let err = complete(&mut wizard, SectionPatch::empty(SectionName::Price), &ctx()).unwrap_err();
        assert!(matches!(err, BuybackError::InvalidStep { .. }));
    }

    #[test]
    fn test_back() {
        let mut wizard = WizardController::restore(MemoryStore::new());
        assert!(back(&mut wizard).is_err());

        wizard.advance().unwrap();
        assert_eq!(back(&mut wizard).unwrap(), Step::DeviceSelection);
    }
}
