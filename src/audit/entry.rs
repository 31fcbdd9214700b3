//! Audit entry data structures
//!
//! Defines the structure of audit log entries: which wizard operation ran,
//! what it touched, and optional before/after values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::{changed_fields, generate_diff};
use crate::models::{SectionName, SubmissionId};

/// Wizard operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A section was merged
    Update,
    /// Moved one step forward
    Advance,
    /// Moved one step back
    Retreat,
    /// State cleared by the user
    Reset,
    /// Payload accepted by a sink
    Submit,
    /// Sink rejected the payload; state kept
    SubmitFailed,
    /// Persisted state could not be restored and was dropped
    Discard,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Update => write!(f, "UPDATE"),
            Operation::Advance => write!(f, "ADVANCE"),
            Operation::Retreat => write!(f, "RETREAT"),
            Operation::Reset => write!(f, "RESET"),
            Operation::Submit => write!(f, "SUBMIT"),
            Operation::SubmitFailed => write!(f, "SUBMIT_FAILED"),
            Operation::Discard => write!(f, "DISCARD"),
        }
    }
}

/// What an audited operation acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Section,
    Wizard,
    Submission,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Section => write!(f, "Section"),
            Subject::Wizard => write!(f, "Wizard"),
            Subject::Submission => write!(f, "Submission"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub subject: Subject,

    /// Section name, `wizard`, or the submission id
    pub subject_id: String,

    /// Human-readable label (e.g. step title)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    pub fn new(operation: Operation, subject: Subject, subject_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            subject,
            subject_id: subject_id.into(),
            subject_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = Some(name.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.diff_summary = Some(summary.into());
        self
    }

    /// Entry for a section merge
    ///
    /// Sensitive sections only record which fields changed, never values.
    pub fn section_update(section: SectionName, before: &Value, after: &Value) -> Self {
        let entry = Self::new(Operation::Update, Subject::Section, section.as_str());

        if section.is_sensitive() {
            let fields = changed_fields(before, after);
            if fields.is_empty() {
                return entry;
            }
            return entry.with_summary(format!("fields changed: {}", fields.join(", ")));
        }

        Self {
            before: Some(before.clone()),
            after: Some(after.clone()),
            diff_summary: generate_diff(before, after),
            ..entry
        }
    }

    /// Entry for a move between steps
    pub fn step_change(operation: Operation, from: usize, to: usize, title: &str) -> Self {
        Self {
            before: Some(Value::from(from)),
            after: Some(Value::from(to)),
            diff_summary: Some(format!("step {} -> {}", from + 1, to + 1)),
            ..Self::new(operation, Subject::Wizard, "wizard").with_name(title)
        }
    }

    pub fn submitted(id: &SubmissionId) -> Self {
        Self::new(Operation::Submit, Subject::Submission, id.as_str())
    }

    pub fn submit_failed(reason: impl Into<String>) -> Self {
        Self::new(Operation::SubmitFailed, Subject::Submission, "-").with_summary(reason)
    }

    pub fn discarded(reason: impl Into<String>) -> Self {
        Self::new(Operation::Discard, Subject::Wizard, "wizard").with_summary(reason)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.subject,
            self.subject_id
        );

        if let Some(name) = &self.subject_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Advance.to_string(), "ADVANCE");
        assert_eq!(Operation::SubmitFailed.to_string(), "SUBMIT_FAILED");
    }

    #[test]
    fn test_section_update_records_values() {
        let entry = AuditEntry::section_update(
            SectionName::DeviceDetails,
            &json!({"brand": "Apple"}),
            &json!({"brand": "Apple", "model": "X"}),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.subject_id, "device-details");
        assert!(entry.after.is_some());
        assert_eq!(entry.diff_summary.as_deref(), Some("model: (added) -> \"X\""));
    }

    #[test]
    fn test_identity_update_is_redacted() {
        let entry = AuditEntry::section_update(
            SectionName::Identity,
            &json!({}),
            &json!({"email": "seller@example.com", "cnic": "12345-1234567-1"}),
        );

        assert!(entry.before.is_none());
        assert!(entry.after.is_none());
        let summary = entry.diff_summary.unwrap();
        assert_eq!(summary, "fields changed: cnic, email");

        let line = serde_json::to_string(&AuditEntry::section_update(
            SectionName::Identity,
            &json!({}),
            &json!({"email": "seller@example.com"}),
        ))
        .unwrap();
        assert!(!line.contains("seller@example.com"));
    }

    #[test]
    fn test_step_change_entry() {
        let entry = AuditEntry::step_change(Operation::Advance, 0, 1, "Device details");

        assert_eq!(entry.subject, Subject::Wizard);
        assert_eq!(entry.before, Some(json!(0)));
        assert_eq!(entry.after, Some(json!(1)));
        assert_eq!(entry.diff_summary.as_deref(), Some("step 1 -> 2"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::submitted(&SubmissionId::new("doc-1"));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"submit\""));
        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Submit);
        assert_eq!(back.subject_id, "doc-1");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::step_change(Operation::Retreat, 2, 1, "Device details");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("RETREAT"));
        assert!(formatted.contains("Wizard"));
        assert!(formatted.contains("(Device details)"));
        assert!(formatted.contains("step 3 -> 2"));
    }
}
