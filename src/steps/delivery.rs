//! Step 3: pickup or parcel

use chrono::NaiveDate;

use crate::error::{BuybackError, BuybackResult};
use crate::models::{DeliveryMethod, DeliverySection};

use super::required_text;

pub fn validate(section: &DeliverySection, today: NaiveDate) -> BuybackResult<()> {
    let method = section
        .method
        .ok_or_else(|| BuybackError::missing_field("method"))?;

    if method == DeliveryMethod::Pickup {
        required_text(&section.address, "address")?;
    }

    if let Some(date) = section.preferred_date {
        if date < today {
            return Err(BuybackError::Validation(format!(
                "preferredDate {} is in the past",
                date
            )));
        }
    }

    Ok(())
}
