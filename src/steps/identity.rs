//! Step 4: identity verification
//!
//! Every field is required. Email, CNIC and phone number are checked
//! against fixed patterns and the ID image must be an existing file.

use regex::Regex;

use crate::error::{BuybackError, BuybackResult};
use crate::models::IdentitySection;

use super::required_text;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const CNIC_PATTERN: &str = r"^\d{5}-\d{7}-\d$";
const PHONE_PATTERN: &str = r"^\+?[\d\s-]+$";

fn check(pattern: &str, field: &str, value: &str) -> BuybackResult<()> {
    let re = Regex::new(pattern)
        .map_err(|e| BuybackError::Validation(format!("bad pattern for {}: {}", field, e)))?;
    if re.is_match(value) {
        Ok(())
    } else {
        Err(BuybackError::invalid_field(field, value))
    }
}

fn check_phone(value: &str) -> BuybackResult<()> {
    check(PHONE_PATTERN, "phoneNumber", value)?;
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if (7..=20).contains(&digits) {
        Ok(())
    } else {
        Err(BuybackError::Validation(
            "phoneNumber must contain 7 to 20 digits".into(),
        ))
    }
}

pub fn validate(section: &IdentitySection) -> BuybackResult<()> {
    required_text(&section.full_name, "fullName")?;
    section
        .id_type
        .ok_or_else(|| BuybackError::missing_field("idType"))?;
    required_text(&section.id_number, "idNumber")?;

    check(CNIC_PATTERN, "cnic", required_text(&section.cnic, "cnic")?)?;
    check(EMAIL_PATTERN, "email", required_text(&section.email, "email")?)?;
    check_phone(required_text(&section.phone_number, "phoneNumber")?)?;

    let image = section
        .id_image
        .as_ref()
        .ok_or_else(|| BuybackError::missing_field("idImage"))?;
    if !image.is_file() {
        return Err(BuybackError::Validation(format!(
            "idImage not found: {}",
            image.display()
        )));
    }

    if section.terms_agreed != Some(true) {
        return Err(BuybackError::Validation(
            "the terms and conditions must be accepted".into(),
        ));
    }

    Ok(())
}
