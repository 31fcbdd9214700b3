//! Audit logging for the sell wizard
//!
//! Every wizard operation (section merge, step move, reset, submission,
//! discarded state) is appended to a line-delimited JSON log. This is the
//! application's structured log and backs the `history` command.
//!
//! - `AuditEntry`: one record with timestamp, operation, subject and optional
//!   before/after values.
//! - `AuditLogger`: appends entries to and reads them from the JSONL file.
//! - `generate_diff`: human-readable summary of a section change.
//!
//! Identity section values never reach the log; only the names of changed
//! fields are recorded.

mod diff;
mod entry;
mod logger;

pub use diff::{changed_fields, generate_diff};
pub use entry::{AuditEntry, Operation, Subject};
pub use logger::AuditLogger;
