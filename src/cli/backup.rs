//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::error::{VaultError, VaultResult};
use crate::export::read_statement_json;
use crate::storage::read_text;

use super::record_audit;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up a statement JSON file
    Create {
        /// Statement JSON file
        statement: PathBuf,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore a backup into the statements directory
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path
        backup: String,
    },

    /// Delete old backups according to retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &VaultPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> VaultResult<()> {
    let retention = settings.backup_retention.clone();
    let manager = BackupManager::new(paths.clone(), retention);

    match cmd {
        BackupCommands::Create { statement } => {
            let record = read_statement_json(&read_text(&statement)?)?;

            println!("Creating backup...");
            let (created, deleted) = manager.create_backup_with_retention(&record)?;
            let filename = file_name_of(&created.path);
            println!("Backup created: {}", filename);
            println!("Location: {}", created.path.display());
            println!("Transactions: {}", created.summary.rows_written);
            if !deleted.is_empty() {
                println!("Pruned {} old backup(s).", deleted.len());
            }

            let mut entries = vec![AuditEntry::new(
                Operation::Backup,
                EntityType::Backup,
                filename,
                Some(created.summary.statement_id.to_string()),
            )
            .with_details(serde_json::json!({
                "rows": created.summary.rows_written,
                "saved_at": created.summary.saved_at,
            }))];
            if !deleted.is_empty() {
                entries.push(prune_entry(&deleted));
            }
            record_audit(paths, settings, &entries)?;
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: vault backup create <statement.json>");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let age_str = format_duration(age);

                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };

                if verbose {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}){}",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                        monthly_marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;

            let restore_manager = RestoreManager::new(paths.clone()).with_pretty(settings.pretty_json);
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!("Status: {}", validation.summary());
            println!();

            if !validation.is_valid {
                return Err(VaultError::Validation(format!(
                    "{} cannot be restored",
                    backup_path.display()
                )));
            }

            if !force {
                println!("WARNING: This will overwrite any earlier restore of this statement!");
                println!("To proceed, run again with --force flag:");
                println!("  vault backup restore {} --force", backup);
                return Ok(());
            }

            println!("Restoring from backup...");
            let result = restore_manager.restore_from_file(&backup_path)?;

            println!("Restore complete!");
            println!("{}", result.summary());
            println!("Written to: {}", result.output_path.display());

            record_audit(
                paths,
                settings,
                &[AuditEntry::new(
                    Operation::Restore,
                    EntityType::Statement,
                    result.statement_id.as_str(),
                    Some(result.bank_name.clone()).filter(|name| !name.is_empty()),
                )
                .with_details(serde_json::json!({
                    "source": file_name_of(&backup_path),
                    "rows": result.transaction_count,
                    "dropped_rows": result.dropped_rows,
                }))],
            )?;
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;

            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&backup_path)?;

            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));

            if let Some(info) = manager.get_backup(&file_name_of(&backup_path))? {
                println!("Created: {}", info.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!();

            if validation.is_valid {
                println!("Contents:");
                println!(
                    "  Statement:    {}",
                    validation
                        .statement_id
                        .as_ref()
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "(none)".to_string())
                );
                println!("  Bank:         {}", validation.bank_name);
                println!("  Period:       {}", validation.period);
                println!("  Transactions: {}", validation.transaction_count);
                println!();
            }
            println!(
                "Status: {}",
                if validation.is_complete() {
                    "Complete".to_string()
                } else {
                    validation.summary()
                }
            );
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let retention = manager.retention();

            let monthly_count = backups.iter().filter(|b| b.is_monthly).count();
            let daily_count = backups.len() - monthly_count;
            let (daily_to_delete, monthly_to_delete) = manager.prune_preview()?;
            let total_to_delete = daily_to_delete + monthly_to_delete;

            if total_to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Current retention policy: {} daily, {} monthly",
                    retention.daily_count, retention.monthly_count
                );
                println!(
                    "You have {} daily and {} monthly backups.",
                    daily_count, monthly_count
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!(
                "Retention policy: {} daily, {} monthly",
                retention.daily_count, retention.monthly_count
            );
            println!(
                "Current backups: {} daily, {} monthly",
                daily_count, monthly_count
            );
            println!(
                "To be deleted: {} daily, {} monthly ({} total)",
                daily_to_delete, monthly_to_delete, total_to_delete
            );
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  vault backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
            record_audit(paths, settings, &[prune_entry(&deleted)])?;
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &VaultPaths,
    backup: &str,
) -> VaultResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| VaultError::backup_not_found("latest"));
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    // Check if it's a filename in the backup directory
    let backup_path = paths.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    let with_ext = paths.backup_dir().join(format!("{}.sql", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(VaultError::backup_not_found(backup))
}

fn prune_entry(deleted: &[PathBuf]) -> AuditEntry {
    let names: Vec<String> = deleted.iter().map(|p| file_name_of(p)).collect();
    AuditEntry::new(
        Operation::Prune,
        EntityType::Backup,
        format!("{} backup(s)", deleted.len()),
        None,
    )
    .with_details(serde_json::json!({ "deleted": names }))
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
