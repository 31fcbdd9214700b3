//! Core data models for the buyback wizard
//!
//! This module contains the data structures that describe a device listing:
//! the device vocabularies, the sectioned form payload, submission documents
//! and their ids.

pub mod device;
pub mod ids;
pub mod section;
pub mod submission;

pub use device::{
    ApprovalStatus, Condition, DeliveryMethod, DeviceType, IdType, PayoutMethod, StorageCapacity,
};
pub use ids::SubmissionId;
pub use section::{
    DeliverySection, DeviceDetailsSection, DeviceSelectionSection, IdentitySection, PriceSection,
    SectionName, SectionPatch, SectionedFormData,
};
pub use submission::{StoredSubmission, SubmissionDocument, SubmissionStatus};
