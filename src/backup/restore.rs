//! Backup restoration for Statement Vault
//!
//! Decodes backup files and writes the recovered statement as JSON into the
//! statements directory.

use std::path::{Path, PathBuf};

use crate::codec::{decode_with_report, DecodeReport};
use crate::config::paths::VaultPaths;
use crate::error::{VaultError, VaultResult};
use crate::models::StatementId;
use crate::storage::{read_text, write_json_atomic};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: VaultPaths,
    pretty: bool,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: VaultPaths) -> Self {
        Self {
            paths,
            pretty: true,
        }
    }

    /// Choose whether restored JSON is pretty-printed
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Restore a statement from a backup file
    ///
    /// The statement is written to `statements/<id>.json` (see
    /// [`VaultPaths::statement_file`]), replacing any
    /// earlier restore of the same statement. A backup without an id gets a
    /// freshly minted one.
    pub fn restore_from_file(&self, backup_path: &Path) -> VaultResult<RestoreResult> {
        let contents = read_text(backup_path)?;
        let report = decode_with_report(&contents)?;
        self.restore_from_report(report)
    }

    /// Write an already decoded statement into the statements directory
    pub fn restore_from_report(&self, report: DecodeReport) -> VaultResult<RestoreResult> {
        self.paths.ensure_directories()?;

        let mut statement = report.statement;
        let statement_id = statement
            .id
            .get_or_insert_with(StatementId::generate)
            .clone();

        let output_path = self.paths.statement_file(&statement_id);
        write_json_atomic(&output_path, &statement, self.pretty).map_err(|e| {
            VaultError::Storage(format!(
                "Failed to write restored statement {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(RestoreResult {
            statement_id,
            bank_name: statement.bank_name,
            transaction_count: statement.transactions.len(),
            dropped_rows: report.dropped_rows,
            output_path,
        })
    }

    /// Validate a backup file without restoring it
    ///
    /// A file that cannot be decoded is reported as invalid; only a file
    /// that cannot be read is an error.
    pub fn validate_backup(&self, backup_path: &Path) -> VaultResult<ValidationResult> {
        let contents = read_text(backup_path)?;

        match decode_with_report(&contents) {
            Ok(report) => Ok(ValidationResult {
                is_valid: true,
                statement_id: report.statement.id.clone(),
                bank_name: report.statement.bank_name.clone(),
                period: report.statement.period.clone(),
                saved_at: report.statement.saved_at,
                transaction_count: report.statement.transactions.len(),
                dropped_rows: report.dropped_rows,
                metadata_blocks: report.metadata_blocks,
                error: None,
            }),
            Err(err @ VaultError::CorruptBackup(_)) => Ok(ValidationResult {
                error: Some(err.to_string()),
                ..ValidationResult::default()
            }),
            Err(err) => Err(err),
        }
    }
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Id of the restored statement
    pub statement_id: StatementId,
    /// Bank named in the backup
    pub bank_name: String,
    /// Transactions recovered
    pub transaction_count: usize,
    /// Rows dropped for having too few values
    pub dropped_rows: usize,
    /// Where the statement JSON was written
    pub output_path: PathBuf,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Restored statement {} with {} transaction(s)",
            self.statement_id, self.transaction_count
        );
        if self.dropped_rows > 0 {
            summary.push_str(&format!(
                " ({} incomplete row(s) skipped)",
                self.dropped_rows
            ));
        }
        summary
    }
}

/// Result of validating a backup
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether the backup decodes
    pub is_valid: bool,
    /// Statement id in the header
    pub statement_id: Option<StatementId>,
    /// Bank named in the header
    pub bank_name: String,
    /// Statement period in the header
    pub period: String,
    /// savedAt in the header
    pub saved_at: Option<i64>,
    /// Transactions that would be restored
    pub transaction_count: usize,
    /// Rows that would be dropped
    pub dropped_rows: usize,
    /// Statement inserts found; only the first is used
    pub metadata_blocks: usize,
    /// Why the backup is invalid
    pub error: Option<String>,
}

impl ValidationResult {
    /// Check if the backup decodes with nothing ignored
    pub fn is_complete(&self) -> bool {
        self.is_valid && self.dropped_rows == 0 && self.metadata_blocks <= 1
    }

    /// Get a summary of the backup's state
    pub fn summary(&self) -> String {
        if !self.is_valid {
            return format!(
                "Invalid backup: {}",
                self.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut notes = Vec::new();
        if self.dropped_rows > 0 {
            notes.push(format!("{} incomplete row(s)", self.dropped_rows));
        }
        if self.metadata_blocks > 1 {
            notes.push(format!(
                "{} statement headers, first one used",
                self.metadata_blocks
            ));
        }

        if notes.is_empty() {
            format!("Complete backup ({} transactions)", self.transaction_count)
        } else {
            format!(
                "Partial backup ({} transactions): {}",
                self.transaction_count,
                notes.join(", ")
            )
        }
    }
}
