//! Audit history display

use crate::audit::AuditEntry;

/// Format audit entries as a table, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.".to_string();
    }

    let op_width = entries
        .iter()
        .map(|e| e.operation.to_string().len())
        .max()
        .unwrap_or(9)
        .max(9);

    let subject_width = entries
        .iter()
        .map(|e| e.subject_id.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<19}  {:<op_width$}  {:<subject_width$}  {}\n",
        "Time",
        "Operation",
        "Subject",
        "Changes",
        op_width = op_width,
        subject_width = subject_width,
    ));
    output.push_str(&format!(
        "{:-<19}  {:-<op_width$}  {:-<subject_width$}  {:-<7}\n",
        "",
        "",
        "",
        "",
        op_width = op_width,
        subject_width = subject_width,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<19}  {:<op_width$}  {:<subject_width$}  {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.operation.to_string(),
            entry.subject_id,
            entry.diff_summary.as_deref().unwrap_or(""),
            op_width = op_width,
            subject_width = subject_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[]), "No history recorded.");
    }

    #[test]
    fn test_history_rows() {
        let entries = vec![
            AuditEntry::step_change(Operation::Advance, 0, 1, "Device details"),
            AuditEntry::submit_failed("connection refused"),
        ];
        let output = format_history(&entries);

        assert!(output.contains("ADVANCE"));
        assert!(output.contains("step 1 -> 2"));
        assert!(output.contains("SUBMIT_FAILED"));
        assert!(output.contains("connection refused"));
        assert_eq!(output.lines().count(), 4);
    }
}
