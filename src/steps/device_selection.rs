//! Step 1: which kind of device is being sold

use crate::error::{BuybackError, BuybackResult};
use crate::models::DeviceSelectionSection;

pub fn validate(section: &DeviceSelectionSection) -> BuybackResult<()> {
    section
        .device_type
        .map(|_| ())
        .ok_or_else(|| BuybackError::missing_field("deviceType"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceType;

    #[test]
    fn test_device_type_required() {
        assert!(validate(&DeviceSelectionSection::default()).is_err());
        assert!(validate(&DeviceSelectionSection {
            device_type: Some(DeviceType::Other)
        })
        .is_ok());
    }
}
