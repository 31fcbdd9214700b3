//! Wizard steps in order

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::SectionName;

/// One page of the sell wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    DeviceSelection,
    DeviceDetails,
    Delivery,
    Identity,
    PriceReview,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Self::DeviceSelection,
        Self::DeviceDetails,
        Self::Delivery,
        Self::Identity,
        Self::PriceReview,
        Self::Review,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn first() -> Self {
        Self::DeviceSelection
    }

    pub fn last() -> Self {
        Self::Review
    }

    /// Zero-based position
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Section this step writes; the review step writes none
    pub fn section(&self) -> Option<SectionName> {
        match self {
            Self::DeviceSelection => Some(SectionName::DeviceSelection),
            Self::DeviceDetails => Some(SectionName::DeviceDetails),
            Self::Delivery => Some(SectionName::Delivery),
            Self::Identity => Some(SectionName::Identity),
            Self::PriceReview => Some(SectionName::Price),
            Self::Review => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DeviceSelection => "Device selection",
            Self::DeviceDetails => "Device details",
            Self::Delivery => "Delivery",
            Self::Identity => "Identity verification",
            Self::PriceReview => "Price review",
            Self::Review => "Review & submit",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
