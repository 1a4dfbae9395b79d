//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the codec and backup layers.

pub mod backup;
pub mod codec;
pub mod history;

pub use backup::{handle_backup_command, BackupCommands};
pub use codec::{handle_decode, handle_encode, handle_inspect, DecodeFormat};
pub use history::handle_history;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::error::VaultResult;

/// Append entries to the audit log unless auditing is switched off
pub(crate) fn record_audit(
    paths: &VaultPaths,
    settings: &Settings,
    entries: &[AuditEntry],
) -> VaultResult<()> {
    if !settings.audit_enabled {
        return Ok(());
    }
    AuditLogger::new(paths.audit_log()).log_batch(entries)
}
