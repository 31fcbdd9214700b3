//! Device and offer enumerations
//!
//! Closed vocabularies used by the form sections: device type, condition,
//! storage capacity, delivery method, identity document type, payout method
//! and approval status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of device being sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Smartphone,
    Tablet,
    Laptop,
    Other,
}

impl DeviceType {
    /// Parse device type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "smartphone" | "phone" => Some(Self::Smartphone),
            "tablet" => Some(Self::Tablet),
            "laptop" => Some(Self::Laptop),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smartphone => write!(f, "Smartphone"),
            Self::Tablet => write!(f, "Tablet"),
            Self::Laptop => write!(f, "Laptop"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Physical condition reported by the seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
    Fair,
    Poor,
    Damaged,
}

impl Condition {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            "damaged" => Some(Self::Damaged),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Used => write!(f, "used"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
            Self::Damaged => write!(f, "damaged"),
        }
    }
}

/// Storage capacity in gigabytes
///
/// Serialized as a human string such as `"128GB"` or `"1TB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageCapacity(u32);

impl StorageCapacity {
    pub const fn from_gigabytes(gb: u32) -> Self {
        Self(gb)
    }

    pub const fn gigabytes(&self) -> u32 {
        self.0
    }

    /// Parse "128GB", "128 gb", "1TB" or a bare number of gigabytes
    pub fn parse(s: &str) -> Result<Self, String> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let (digits, multiplier) = if let Some(n) = normalized.strip_suffix("TB") {
            (n, 1024)
        } else if let Some(n) = normalized.strip_suffix("GB") {
            (n, 1)
        } else {
            (normalized.as_str(), 1)
        };

        let value: u32 = digits
            .parse()
            .map_err(|_| format!("Invalid storage capacity: '{}'", s.trim()))?;
        if value == 0 {
            return Err(format!("Invalid storage capacity: '{}'", s.trim()));
        }

        value
            .checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| format!("Storage capacity too large: '{}'", s.trim()))
    }
}

impl fmt::Display for StorageCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1024 && self.0 % 1024 == 0 {
            write!(f, "{}TB", self.0 / 1024)
        } else {
            write!(f, "{}GB", self.0)
        }
    }
}

impl TryFrom<String> for StorageCapacity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StorageCapacity> for String {
    fn from(value: StorageCapacity) -> Self {
        value.to_string()
    }
}

/// How the device reaches the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// A courier collects the device from the seller's address
    Pickup,
    /// The seller ships the device to the processing center
    Parcel,
}

impl DeliveryMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pickup" => Some(Self::Pickup),
            "parcel" => Some(Self::Parcel),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pickup => write!(f, "Pickup"),
            Self::Parcel => write!(f, "Parcel"),
        }
    }
}

/// Government-issued document used for identity verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdType {
    Passport,
    DrivingLicense,
    NationalId,
}

impl IdType {
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "passport" => Some(Self::Passport),
            "drivinglicense" | "drivinglicence" => Some(Self::DrivingLicense),
            "nationalid" => Some(Self::NationalId),
            _ => None,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passport => write!(f, "Passport"),
            Self::DrivingLicense => write!(f, "Driving License"),
            Self::NationalId => write!(f, "National ID"),
        }
    }
}

/// How the seller wants to be paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    BankTransfer,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PayoutMethod {
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "banktransfer" | "bank" => Some(Self::BankTransfer),
            "paypal" => Some(Self::Paypal),
            "applepay" => Some(Self::ApplePay),
            "googlepay" => Some(Self::GooglePay),
            _ => None,
        }
    }
}

impl fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BankTransfer => write!(f, "Bank Transfer"),
            Self::Paypal => write!(f, "PayPal"),
            Self::ApplePay => write!(f, "Apple Pay"),
            Self::GooglePay => write!(f, "Google Pay"),
        }
    }
}

/// Review status of an accepted offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Accepted by the seller, waiting for a reviewer
    #[default]
    PendingReview,
    Approved,
    Rejected,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingReview => write!(f, "Pending review"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}
