//! Step 5: show the offer and record its acceptance
//!
//! The offer is computed from the device sections; the seller only picks a
//! payout method. Accepting stores the price with `pending_review` status,
//! together with the device attributes it was computed from.

use crate::error::{BuybackError, BuybackResult};
use crate::models::{ApprovalStatus, PriceSection, SectionedFormData};
use crate::pricing::{DeviceAttributes, Quote};

use super::device_details::check_purchase_year;
use super::StepContext;

fn priced_attributes(payload: &SectionedFormData, ctx: &StepContext) -> BuybackResult<DeviceAttributes> {
    let attributes = DeviceAttributes::from_payload(payload)?;
    check_purchase_year(attributes.purchase_year, ctx.current_year())?;
    Ok(attributes)
}

/// Current offer for the device described in `payload`
pub fn offer(payload: &SectionedFormData, ctx: &StepContext) -> BuybackResult<Quote> {
    let attributes = priced_attributes(payload, ctx)?;
    Ok(ctx.quoter.quote(&attributes, ctx.current_year()))
}

pub fn validate(section: &PriceSection) -> BuybackResult<()> {
    section
        .payout_method
        .ok_or_else(|| BuybackError::missing_field("payoutMethod"))?;
    if section.accepted != Some(true)
        || section.estimated_price.is_none()
        || section.priced_device.is_none()
    {
        return Err(BuybackError::Validation("the offer has not been accepted".into()));
    }
    Ok(())
}

/// Check the accepted offer against the device sections as they are now
///
/// Device sections can still be edited after acceptance, so an offer priced
/// for different attributes is rejected.
pub fn validate_current(payload: &SectionedFormData) -> BuybackResult<()> {
    validate(&payload.price)?;
    let current = DeviceAttributes::from_payload(payload)?;
    if payload.price.priced_device.as_ref() != Some(&current) {
        return Err(BuybackError::Validation(
            "offer is out of date; redo the price review".into(),
        ));
    }
    Ok(())
}

/// Build the accepted price section for `patch`
pub fn accept(
    payload: &SectionedFormData,
    patch: &PriceSection,
    ctx: &StepContext,
) -> BuybackResult<PriceSection> {
    let attributes = priced_attributes(payload, ctx)?;
    let quote = ctx.quoter.quote(&attributes, ctx.current_year());
    let candidate = payload.price.merged(patch);

    let accepted = PriceSection {
        estimated_price: Some(quote.price),
        accepted: Some(true),
        status: Some(ApprovalStatus::PendingReview),
        payout_method: candidate.payout_method,
        priced_device: Some(attributes),
    };
    validate(&accepted)?;
    Ok(accepted)
}
