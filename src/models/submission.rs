//! Submission documents handed to a sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SubmissionId;
use super::section::SectionedFormData;

/// Processing status of a sell request
///
/// Requests leave this tool pending; later states are set downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
}

/// The full wizard payload as one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDocument {
    #[serde(flatten)]
    pub payload: SectionedFormData,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl SubmissionDocument {
    /// Wrap a payload as a new pending document
    pub fn new(payload: SectionedFormData) -> Self {
        Self {
            payload,
            created_at: Utc::now(),
            status: SubmissionStatus::Pending,
        }
    }
}

/// A document together with the id its sink assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: SubmissionId,
    #[serde(flatten)]
    pub document: SubmissionDocument,
}
