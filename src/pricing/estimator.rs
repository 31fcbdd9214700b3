//! Offer estimation
//!
//! A pure, deterministic formula: a base price for the device type, scaled
//! by condition, plus a storage bonus, minus fixed penalties for defects and
//! age. Results are whole currency units and never negative.

use serde::{Deserialize, Serialize};

use crate::error::{BuybackError, BuybackResult};
use crate::models::{Condition, DeviceType, SectionedFormData, StorageCapacity};

/// Deducted per listed defect
pub const DEFECT_PENALTY: i64 = 50;

/// Deducted per year since purchase
pub const AGE_PENALTY_PER_YEAR: i64 = 50;

/// Everything the estimator looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAttributes {
    pub device_type: DeviceType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Condition,
    pub storage: Option<StorageCapacity>,
    pub defect_count: usize,
    pub purchase_year: i32,
}

impl DeviceAttributes {
    /// Collect attributes from the device sections of a payload
    ///
    /// Device type, condition and purchase year are required; storage and
    /// defects are optional.
    pub fn from_payload(payload: &SectionedFormData) -> BuybackResult<Self> {
        let details = &payload.device_details;

        Ok(Self {
            device_type: payload
                .device_selection
                .device_type
                .ok_or_else(|| BuybackError::missing_field("deviceType"))?,
            brand: details.brand.clone(),
            model: details.model.clone(),
            condition: details
                .condition
                .ok_or_else(|| BuybackError::missing_field("condition"))?,
            storage: details.storage,
            defect_count: details.defects.as_ref().map_or(0, Vec::len),
            purchase_year: details
                .purchase_year
                .ok_or_else(|| BuybackError::missing_field("purchaseYear"))?,
        })
    }
}

/// Base price for a device type
pub fn base_price(device_type: DeviceType) -> i64 {
    match device_type {
        DeviceType::Smartphone => 200,
        DeviceType::Tablet => 150,
        DeviceType::Laptop => 300,
        DeviceType::Other => 100,
    }
}

pub fn condition_factor(condition: Condition) -> f64 {
    match condition {
        Condition::New => 1.5,
        Condition::Used => 1.0,
        Condition::Fair => 0.8,
        Condition::Poor | Condition::Damaged => 0.6,
    }
}

/// Bonus for the highest storage tier reached
pub fn storage_bonus(storage: Option<StorageCapacity>) -> i64 {
    match storage.map(|s| s.gigabytes()) {
        Some(gb) if gb >= 512 => 200,
        Some(gb) if gb >= 256 => 100,
        Some(gb) if gb >= 128 => 50,
        _ => 0,
    }
}

/// Estimate an offer using the built-in device-type base prices
pub fn estimate(attributes: &DeviceAttributes, current_year: i32) -> i64 {
    estimate_from_base(attributes, base_price(attributes.device_type), current_year)
}

/// Estimate an offer from an externally resolved base price
pub fn estimate_from_base(attributes: &DeviceAttributes, base: i64, current_year: i32) -> i64 {
    let age = (i64::from(current_year) - i64::from(attributes.purchase_year)).max(0);
    let defects = i64::try_from(attributes.defect_count).unwrap_or(i64::MAX / DEFECT_PENALTY);

    let price = base as f64 * condition_factor(attributes.condition)
        + storage_bonus(attributes.storage) as f64
        - (defects.saturating_mul(DEFECT_PENALTY)) as f64
        - age.saturating_mul(AGE_PENALTY_PER_YEAR) as f64;

    (price.round() as i64).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionPatch;
    use crate::models::SectionName;

    fn smartphone(condition: Condition, defects: usize, purchase_year: i32) -> DeviceAttributes {
        DeviceAttributes {
            device_type: DeviceType::Smartphone,
            brand: None,
            model: None,
            condition,
            storage: Some(StorageCapacity::from_gigabytes(128)),
            defect_count: defects,
            purchase_year,
        }
    }

    #[test]
    fn test_used_smartphone_this_year() {
        assert_eq!(estimate(&smartphone(Condition::Used, 0, 2026), 2026), 250);
    }

    #[test]
    fn test_negative_price_clamped_to_zero() {
        // 200 * 0.6 + 50 - 100 - 150 = -80
        assert_eq!(estimate(&smartphone(Condition::Damaged, 2, 2023), 2026), 0);
    }

    #[test]
    fn test_condition_factors() {
        let mut attrs = smartphone(Condition::New, 0, 2026);
        attrs.storage = None;
        assert_eq!(estimate(&attrs, 2026), 300);

        attrs.condition = Condition::Fair;
        assert_eq!(estimate(&attrs, 2026), 160);

        attrs.condition = Condition::Poor;
        assert_eq!(estimate(&attrs, 2026), 120);
    }

    #[test]
    fn test_storage_bonus_highest_tier_only() {
        assert_eq!(storage_bonus(None), 0);
        assert_eq!(storage_bonus(Some(StorageCapacity::from_gigabytes(64))), 0);
        assert_eq!(storage_bonus(Some(StorageCapacity::from_gigabytes(128))), 50);
        assert_eq!(storage_bonus(Some(StorageCapacity::from_gigabytes(256))), 100);
        assert_eq!(storage_bonus(Some(StorageCapacity::from_gigabytes(1024))), 200);
    }

    #[test]
    fn test_future_purchase_year_has_no_age_penalty() {
        assert_eq!(estimate(&smartphone(Condition::Used, 0, 2030), 2026), 250);
    }

    #[test]
    fn test_extreme_purchase_years() {
        assert_eq!(estimate(&smartphone(Condition::Used, 0, i32::MIN), 2026), 0);
        assert_eq!(estimate(&smartphone(Condition::Used, 0, i32::MAX), 2026), 250);
        assert_eq!(estimate(&smartphone(Condition::New, 0, i32::MIN), i32::MAX), 0);
    }

    #[test]
    fn test_laptop_with_defects_and_age() {
        let attrs = DeviceAttributes {
            device_type: DeviceType::Laptop,
            brand: None,
            model: None,
            condition: Condition::Used,
            storage: Some(StorageCapacity::from_gigabytes(512)),
            defect_count: 1,
            purchase_year: 2024,
        };
        // 300 + 200 - 50 - 100
        assert_eq!(estimate(&attrs, 2026), 350);
    }

    #[test]
    fn test_estimate_from_base() {
        let attrs = smartphone(Condition::Fair, 0, 2026);
        // 500 * 0.8 + 50
        assert_eq!(estimate_from_base(&attrs, 500, 2026), 450);
    }

    #[test]
    fn test_deterministic() {
        let attrs = smartphone(Condition::Used, 1, 2022);
        assert_eq!(estimate(&attrs, 2026), estimate(&attrs, 2026));
    }

    #[test]
    fn test_from_payload() {
        let mut payload = SectionedFormData::default();
        payload.apply(
            SectionPatch::from_fields(SectionName::DeviceSelection, [("deviceType", "Tablet")])
                .unwrap(),
        );
        assert!(DeviceAttributes::from_payload(&payload).is_err());

        payload.apply(
            SectionPatch::from_fields(
                SectionName::DeviceDetails,
                [
                    ("brand", "Apple"),
                    ("condition", "used"),
                    ("purchaseYear", "2025"),
                    ("defects", "Scratches, Dead pixels"),
                ],
            )
            .unwrap(),
        );

        let attrs = DeviceAttributes::from_payload(&payload).unwrap();
        assert_eq!(attrs.device_type, DeviceType::Tablet);
        assert_eq!(attrs.defect_count, 2);
        assert_eq!(attrs.storage, None);
        assert_eq!(attrs.brand.as_deref(), Some("Apple"));
    }
}
