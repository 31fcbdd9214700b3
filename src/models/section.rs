//! Sectioned form payload
//!
//! The sell wizard accumulates its data in five independent sections. Every
//! field is optional so a section can hold a partial record while the seller
//! is still filling it in. A `SectionPatch` carries new values for exactly
//! one section and is merged shallowly: fields present in the patch replace
//! the stored value, absent fields are left alone.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::device::{
    ApprovalStatus, Condition, DeliveryMethod, DeviceType, IdType, PayoutMethod, StorageCapacity,
};
use crate::error::{BuybackError, BuybackResult};
use crate::pricing::DeviceAttributes;

/// Name of a payload section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionName {
    DeviceSelection,
    DeviceDetails,
    Delivery,
    Identity,
    Price,
}

impl SectionName {
    pub const ALL: [SectionName; 5] = [
        Self::DeviceSelection,
        Self::DeviceDetails,
        Self::Delivery,
        Self::Identity,
        Self::Price,
    ];

    /// Wire name (kebab-case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceSelection => "device-selection",
            Self::DeviceDetails => "device-details",
            Self::Delivery => "delivery",
            Self::Identity => "identity",
            Self::Price => "price",
        }
    }

    /// Parse a section name; accepts kebab-case, snake_case and camelCase
    pub fn parse(s: &str) -> Option<Self> {
        match field_key(s).as_str() {
            "deviceselection" | "device" => Some(Self::DeviceSelection),
            "devicedetails" | "details" => Some(Self::DeviceDetails),
            "delivery" => Some(Self::Delivery),
            "identity" => Some(Self::Identity),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    /// Whether values in this section must stay out of logs
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a field or section key for lookup: lowercase alphanumerics only,
/// so `purchaseYear`, `purchase_year` and `purchase-year` all match.
fn field_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn unknown_field(section: SectionName, key: &str) -> BuybackError {
    BuybackError::Validation(format!("Unknown field '{}' for section {}", key, section))
}

fn text(value: &str) -> String {
    value.trim().to_string()
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn flag(field: &str, value: &str) -> BuybackResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(BuybackError::invalid_field(field, value.trim())),
    }
}

/// Defines a section record whose fields are all optional, together with
/// its shallow merge.
macro_rules! define_section {
    ($name:ident, $section:expr, { $($field:ident: $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            pub const NAME: SectionName = $section;

            /// Shallow merge: fields set in `patch` overwrite, unset fields are kept
            pub fn merge(&mut self, patch: Self) {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field;
                    }
                )*
            }

            /// Copy of this section with `patch` merged in
            pub fn merged(&self, patch: &Self) -> Self {
                let mut candidate = self.clone();
                candidate.merge(patch.clone());
                candidate
            }

            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

define_section!(DeviceSelectionSection, SectionName::DeviceSelection, {
    device_type: DeviceType,
});

define_section!(DeviceDetailsSection, SectionName::DeviceDetails, {
    brand: String,
    model: String,
    purchase_year: i32,
    condition: Condition,
    storage: StorageCapacity,
    defects: Vec<String>,
    serial_number: String,
    images: Vec<PathBuf>,
});

define_section!(DeliverySection, SectionName::Delivery, {
    method: DeliveryMethod,
    address: String,
    preferred_date: NaiveDate,
    instructions: String,
    tracking_number: String,
    courier_name: String,
});

define_section!(IdentitySection, SectionName::Identity, {
    full_name: String,
    id_type: IdType,
    id_number: String,
    cnic: String,
    email: String,
    phone_number: String,
    id_image: PathBuf,
    terms_agreed: bool,
});

define_section!(PriceSection, SectionName::Price, {
    estimated_price: i64,
    accepted: bool,
    status: ApprovalStatus,
    payout_method: PayoutMethod,
    priced_device: DeviceAttributes,
});

impl DeviceSelectionSection {
    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match field_key(key).as_str() {
            "devicetype" | "type" => {
                self.device_type = Some(
                    DeviceType::parse(value)
                        .ok_or_else(|| BuybackError::invalid_field("deviceType", value.trim()))?,
                )
            }
            _ => return Err(unknown_field(Self::NAME, key)),
        }
        Ok(())
    }
}

impl DeviceDetailsSection {
    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match field_key(key).as_str() {
            "brand" => self.brand = Some(text(value)),
            "model" => self.model = Some(text(value)),
            "purchaseyear" | "yearofpurchase" | "year" => {
                self.purchase_year = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| BuybackError::invalid_field("purchaseYear", value.trim()))?,
                )
            }
            "condition" => {
                self.condition = Some(
                    Condition::parse(value)
                        .ok_or_else(|| BuybackError::invalid_field("condition", value.trim()))?,
                )
            }
            "storage" | "storagecapacity" => {
                self.storage = Some(StorageCapacity::parse(value).map_err(BuybackError::Validation)?)
            }
            "defects" => self.defects = Some(list(value)),
            "serialnumber" | "serial" | "imei" => self.serial_number = Some(text(value)),
            "images" => self.images = Some(list(value).into_iter().map(PathBuf::from).collect()),
            _ => return Err(unknown_field(Self::NAME, key)),
        }
        Ok(())
    }
}

impl DeliverySection {
    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match field_key(key).as_str() {
            "method" | "deliverymethod" => {
                self.method = Some(
                    DeliveryMethod::parse(value)
                        .ok_or_else(|| BuybackError::invalid_field("method", value.trim()))?,
                )
            }
            "address" => self.address = Some(text(value)),
            "preferreddate" | "date" => {
                self.preferred_date = Some(
                    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                        .map_err(|_| BuybackError::invalid_field("preferredDate", value.trim()))?,
                )
            }
            "instructions" | "specialinstructions" => self.instructions = Some(text(value)),
            "trackingnumber" | "tracking" => self.tracking_number = Some(text(value)),
            "couriername" | "courier" => self.courier_name = Some(text(value)),
            _ => return Err(unknown_field(Self::NAME, key)),
        }
        Ok(())
    }
}

impl IdentitySection {
    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match field_key(key).as_str() {
            "fullname" | "name" => self.full_name = Some(text(value)),
            "idtype" => {
                self.id_type = Some(
                    IdType::parse(value)
                        .ok_or_else(|| BuybackError::invalid_field("idType", value.trim()))?,
                )
            }
            "idnumber" => self.id_number = Some(text(value)),
            "cnic" => self.cnic = Some(text(value)),
            "email" => self.email = Some(text(value)),
            "phonenumber" | "phone" => self.phone_number = Some(text(value)),
            "idimage" => self.id_image = Some(PathBuf::from(value.trim())),
            "termsagreed" | "terms" => self.terms_agreed = Some(flag("termsAgreed", value)?),
            _ => return Err(unknown_field(Self::NAME, key)),
        }
        Ok(())
    }
}

impl PriceSection {
    /// Only the payout method is user-editable; the offer itself is computed
    /// by the price review step.
    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match field_key(key).as_str() {
            "payoutmethod" | "payout" | "paymentmethod" => {
                self.payout_method = Some(
                    PayoutMethod::parse(value)
                        .ok_or_else(|| BuybackError::invalid_field("payoutMethod", value.trim()))?,
                )
            }
            _ => return Err(unknown_field(Self::NAME, key)),
        }
        Ok(())
    }
}

/// New values for exactly one section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPatch {
    DeviceSelection(DeviceSelectionSection),
    DeviceDetails(DeviceDetailsSection),
    Delivery(DeliverySection),
    Identity(IdentitySection),
    Price(PriceSection),
}

impl SectionPatch {
    /// An empty patch for `name` (merging it changes nothing)
    pub fn empty(name: SectionName) -> Self {
        match name {
            SectionName::DeviceSelection => Self::DeviceSelection(Default::default()),
            SectionName::DeviceDetails => Self::DeviceDetails(Default::default()),
            SectionName::Delivery => Self::Delivery(Default::default()),
            SectionName::Identity => Self::Identity(Default::default()),
            SectionName::Price => Self::Price(Default::default()),
        }
    }

    /// Build a patch from textual `key=value` pairs
    pub fn from_fields<'a, I>(name: SectionName, fields: I) -> BuybackResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patch = Self::empty(name);
        for (key, value) in fields {
            patch.set_field(key, value)?;
        }
        Ok(patch)
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        match self {
            Self::DeviceSelection(s) => s.set_field(key, value),
            Self::DeviceDetails(s) => s.set_field(key, value),
            Self::Delivery(s) => s.set_field(key, value),
            Self::Identity(s) => s.set_field(key, value),
            Self::Price(s) => s.set_field(key, value),
        }
    }

    pub fn section(&self) -> SectionName {
        match self {
            Self::DeviceSelection(_) => SectionName::DeviceSelection,
            Self::DeviceDetails(_) => SectionName::DeviceDetails,
            Self::Delivery(_) => SectionName::Delivery,
            Self::Identity(_) => SectionName::Identity,
            Self::Price(_) => SectionName::Price,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::DeviceSelection(s) => s.is_empty(),
            Self::DeviceDetails(s) => s.is_empty(),
            Self::Delivery(s) => s.is_empty(),
            Self::Identity(s) => s.is_empty(),
            Self::Price(s) => s.is_empty(),
        }
    }
}

impl From<DeviceSelectionSection> for SectionPatch {
    fn from(section: DeviceSelectionSection) -> Self {
        Self::DeviceSelection(section)
    }
}

impl From<DeviceDetailsSection> for SectionPatch {
    fn from(section: DeviceDetailsSection) -> Self {
        Self::DeviceDetails(section)
    }
}

impl From<DeliverySection> for SectionPatch {
    fn from(section: DeliverySection) -> Self {
        Self::Delivery(section)
    }
}

impl From<IdentitySection> for SectionPatch {
    fn from(section: IdentitySection) -> Self {
        Self::Identity(section)
    }
}

impl From<PriceSection> for SectionPatch {
    fn from(section: PriceSection) -> Self {
        Self::Price(section)
    }
}

/// The whole multi-section payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SectionedFormData {
    pub device_selection: DeviceSelectionSection,
    pub device_details: DeviceDetailsSection,
    pub delivery: DeliverySection,
    pub identity: IdentitySection,
    pub price: PriceSection,
}

impl SectionedFormData {
    /// Merge a patch into its own section; other sections are untouched
    pub fn apply(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::DeviceSelection(p) => self.device_selection.merge(p),
            SectionPatch::DeviceDetails(p) => self.device_details.merge(p),
            SectionPatch::Delivery(p) => self.delivery.merge(p),
            SectionPatch::Identity(p) => self.identity.merge(p),
            SectionPatch::Price(p) => self.price.merge(p),
        }
    }

    /// JSON snapshot of a single section
    pub fn section_json(&self, name: SectionName) -> serde_json::Value {
        let value = match name {
            SectionName::DeviceSelection => serde_json::to_value(&self.device_selection),
            SectionName::DeviceDetails => serde_json::to_value(&self.device_details),
            SectionName::Delivery => serde_json::to_value(&self.delivery),
            SectionName::Identity => serde_json::to_value(&self.identity),
            SectionName::Price => serde_json::to_value(&self.price),
        };
        value.unwrap_or(serde_json::Value::Null)
    }

    pub fn is_section_empty(&self, name: SectionName) -> bool {
        match name {
            SectionName::DeviceSelection => self.device_selection.is_empty(),
            SectionName::DeviceDetails => self.device_details.is_empty(),
            SectionName::Delivery => self.delivery.is_empty(),
            SectionName::Identity => self.identity.is_empty(),
            SectionName::Price => self.price.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        SectionName::ALL.iter().all(|name| self.is_section_empty(*name))
    }
}
