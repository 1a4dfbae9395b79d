//! History command
//!
//! Shows recent audit log entries, optionally narrowed to one statement or
//! operation.

use crate::audit::{AuditLogger, AuditQuery};
use crate::config::paths::VaultPaths;
use crate::error::VaultResult;

/// Print the audit entries matching `query`, oldest first
pub fn handle_history(paths: &VaultPaths, query: &AuditQuery) -> VaultResult<()> {
    let page = AuditLogger::new(paths.audit_log()).query(query)?;

    if page.matched == 0 {
        if query.is_unfiltered() {
            println!("No history recorded yet.");
        } else {
            println!("No matching history.");
        }
        return Ok(());
    }

    for entry in &page.entries {
        println!("{}", entry.format_human_readable());
    }

    if page.is_truncated() {
        println!();
        println!("Showing {} of {} entries.", page.entries.len(), page.matched);
    }

    Ok(())
}
