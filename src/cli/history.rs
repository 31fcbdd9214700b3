//! Audit history command

use crate::audit::AuditLogger;
use crate::config::BuybackPaths;
use crate::display::format_history;
use crate::error::BuybackResult;

pub fn handle_history_command(paths: &BuybackPaths, limit: usize) -> BuybackResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    println!("{}", format_history(&entries).trim_end());
    if !entries.is_empty() {
        println!();
        println!("Showing {} of {} entries", entries.len(), logger.entry_count()?);
    }
    Ok(())
}
