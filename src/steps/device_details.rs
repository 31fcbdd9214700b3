//! Step 2: brand, model, age, condition and storage

use crate::error::{BuybackError, BuybackResult};
use crate::models::DeviceDetailsSection;

use super::required_text;

/// Oldest purchase year accepted
pub const MIN_PURCHASE_YEAR: i32 = 1990;

/// Reject purchase years before `MIN_PURCHASE_YEAR` or after `current_year`
pub fn check_purchase_year(year: i32, current_year: i32) -> BuybackResult<()> {
    if !(MIN_PURCHASE_YEAR..=current_year).contains(&year) {
        return Err(BuybackError::Validation(format!(
            "purchaseYear must be between {} and {}",
            MIN_PURCHASE_YEAR, current_year
        )));
    }
    Ok(())
}

pub fn validate(section: &DeviceDetailsSection, current_year: i32) -> BuybackResult<()> {
    required_text(&section.brand, "brand")?;
    required_text(&section.model, "model")?;

    let year = section
        .purchase_year
        .ok_or_else(|| BuybackError::missing_field("purchaseYear"))?;
    check_purchase_year(year, current_year)?;

    section
        .condition
        .ok_or_else(|| BuybackError::missing_field("condition"))?;
    section
        .storage
        .ok_or_else(|| BuybackError::missing_field("storage"))?;

    for image in section.images.iter().flatten() {
        if !image.is_file() {
            return Err(BuybackError::Validation(format!(
                "image not found: {}",
                image.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, StorageCapacity};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn complete_section() -> DeviceDetailsSection {
        DeviceDetailsSection {
            brand: Some("Samsung".into()),
            model: Some("Galaxy S21".into()),
            purchase_year: Some(2022),
            condition: Some(Condition::Fair),
            storage: Some(StorageCapacity::from_gigabytes(256)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid() {
        assert!(validate(&complete_section(), 2026).is_ok());
    }

    #[test]
    fn test_blank_brand_rejected() {
        let section = DeviceDetailsSection {
            brand: Some("   ".into()),
            ..complete_section()
        };
        let err = validate(&section, 2026).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: brand is required");
    }

    #[test]
    fn test_purchase_year_bounds() {
        let mut section = complete_section();
        section.purchase_year = Some(1989);
        assert!(validate(&section, 2026).is_err());
        section.purchase_year = Some(2027);
        assert!(validate(&section, 2026).is_err());
        section.purchase_year = Some(2026);
        assert!(validate(&section, 2026).is_ok());
    }

    #[test]
    fn test_check_purchase_year_extremes() {
        assert!(check_purchase_year(i32::MIN, 2026).is_err());
        assert!(check_purchase_year(i32::MAX, 2026).is_err());
        assert!(check_purchase_year(MIN_PURCHASE_YEAR, 2026).is_ok());
    }

    #[test]
    fn test_storage_required() {
        let section = DeviceDetailsSection {
            storage: None,
            ..complete_section()
        };
        assert!(validate(&section, 2026).is_err());
    }

    #[test]
    fn test_images_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("front.jpg");
        std::fs::write(&photo, b"jpg").unwrap();

        let mut section = complete_section();
        section.images = Some(vec![photo.clone()]);
        assert!(validate(&section, 2026).is_ok());

        section.images = Some(vec![photo, PathBuf::from("/nonexistent/back.jpg")]);
        assert!(validate(&section, 2026).is_err());
    }
}
