//! Backup system for Statement Vault
//!
//! Writes dated `.sql` backups of statements, prunes them with a daily and
//! monthly retention policy, and restores them into the statements directory.
//!
//! # Architecture
//!
//! - `BackupManager`: creates and lists backups and applies retention
//! - `RestoreManager`: validates and restores backups
//!
//! # Backup Format
//!
//! A backup is the encoder's SQL-like text: one `statements` insert holding
//! the statement header followed by one `transactions` insert holding every
//! row. File names are `backup-YYYYMMDD-HHMMSS.sql`.
//!
//! # Retention Policy
//!
//! By default, the system keeps:
//! - 30 daily backups
//! - 12 monthly backups (first backup of each month)
//!
//! # Example
//!
//! ```rust,ignore
//! use statement_vault::backup::{BackupManager, RestoreManager};
//! use statement_vault::config::{BackupRetention, VaultPaths};
//!
//! let paths = VaultPaths::new()?;
//! let backup_manager = BackupManager::new(paths.clone(), BackupRetention::default());
//! let created = backup_manager.create_backup(&statement)?;
//!
//! let restore_manager = RestoreManager::new(paths);
//! let result = restore_manager.restore_from_file(&created.path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager, CreatedBackup};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
