//! Backup manager for Statement Vault
//!
//! Writes dated `.sql` backups of statements and applies a rolling retention
//! policy to them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{EncodeSummary, Encoder};
use crate::config::paths::VaultPaths;
use crate::config::settings::BackupRetention;
use crate::error::{VaultError, VaultResult};
use crate::models::StatementRecord;
use crate::storage::write_atomic;

/// Filename prefix of every backup
const BACKUP_PREFIX: &str = "backup-";

/// Filename extension of every backup
const BACKUP_EXTENSION: &str = "sql";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Whether this is a monthly backup (kept longer)
    pub is_monthly: bool,
}

/// A backup that was just written
#[derive(Debug, Clone)]
pub struct CreatedBackup {
    /// Where the backup was written
    pub path: PathBuf,
    /// What the encoder wrote
    pub summary: EncodeSummary,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: VaultPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    /// Write a backup of a statement
    ///
    /// The backup is streamed into a temp file and renamed into place.
    pub fn create_backup(&self, statement: &StatementRecord) -> VaultResult<CreatedBackup> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.{}",
            BACKUP_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis(),
            BACKUP_EXTENSION
        );
        let backup_path = self.backup_dir.join(&filename);

        let encoder = Encoder::new(statement);
        let mut summary = None;
        write_atomic(&backup_path, |writer| {
            summary = Some(encoder.write_to(writer)?);
            Ok(())
        })?;

        let summary = summary.ok_or_else(|| {
            VaultError::Storage(format!("Backup {} was not written", filename))
        })?;

        Ok(CreatedBackup {
            path: backup_path,
            summary,
        })
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> VaultResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| VaultError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == BACKUP_EXTENSION) {
                if let Some(info) = self.parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Parse backup info from a backup file
    fn parse_backup_info(&self, path: &Path) -> Option<BackupInfo> {
        let filename = path.file_name()?.to_string_lossy().to_string();

        // backup-YYYYMMDD-HHMMSS-mmm.sql
        let date_part = filename
            .strip_prefix(BACKUP_PREFIX)?
            .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
        let created_at = parse_backup_timestamp(date_part)?;

        let size_bytes = fs::metadata(path).ok()?.len();

        Some(BackupInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            size_bytes,
            is_monthly: created_at.day() == 1,
        })
    }

    /// Enforce retention policy by deleting old backups
    ///
    /// Backups taken on the first of a month count against the monthly
    /// allowance, all others against the daily one.
    pub fn enforce_retention(&self) -> VaultResult<Vec<PathBuf>> {
        let backups = self.list_backups()?;
        let mut deleted = Vec::new();

        let (monthly, daily): (Vec<_>, Vec<_>) = backups.into_iter().partition(|b| b.is_monthly);

        for backup in daily.into_iter().skip(self.retention.daily_count as usize) {
            fs::remove_file(&backup.path)
                .map_err(|e| VaultError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        for backup in monthly
            .into_iter()
            .skip(self.retention.monthly_count as usize)
        {
            fs::remove_file(&backup.path).map_err(|e| {
                VaultError::Io(format!("Failed to delete old monthly backup: {}", e))
            })?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Count how many daily and monthly backups retention would delete
    pub fn prune_preview(&self) -> VaultResult<(usize, usize)> {
        let backups = self.list_backups()?;
        let monthly = backups.iter().filter(|b| b.is_monthly).count();
        let daily = backups.len() - monthly;
        Ok((
            daily.saturating_sub(self.retention.daily_count as usize),
            monthly.saturating_sub(self.retention.monthly_count as usize),
        ))
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(
        &self,
        statement: &StatementRecord,
    ) -> VaultResult<(CreatedBackup, Vec<PathBuf>)> {
        let created = self.create_backup(statement)?;
        let deleted = self.enforce_retention()?;
        Ok((created, deleted))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get the retention policy
    pub fn retention(&self) -> &BackupRetention {
        &self.retention
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> VaultResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(self.parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> VaultResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // Expected format: YYYYMMDD-HHMMSS or YYYYMMDD-HHMMSS-mmm (with milliseconds)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = if parts.len() == 3 {
        parts[2].parse().ok()?
    } else {
        0
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;
    let datetime = chrono::NaiveDateTime::new(date, time);

    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}
