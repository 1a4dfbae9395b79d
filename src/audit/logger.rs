//! Append-only JSONL audit log
//!
//! One JSON object per line. Writers append and flush; readers parse the
//! whole file and filter with an [`AuditQuery`].

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{VaultError, VaultResult};

use super::entry::{AuditEntry, Operation};

/// Filter for reading back audit entries
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Only entries about this statement id or backup file
    pub entity_id: Option<String>,
    /// Only entries for this operation
    pub operation: Option<Operation>,
    /// Keep only the newest N matches
    pub limit: Option<usize>,
}

impl AuditQuery {
    /// Whether no filter is set
    pub fn is_unfiltered(&self) -> bool {
        self.entity_id.is_none() && self.operation.is_none()
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        self.entity_id
            .as_deref()
            .map_or(true, |id| entry.entity_id == id)
            && self.operation.map_or(true, |op| entry.operation == op)
    }
}

/// Entries returned by [`AuditLogger::query`], oldest first
#[derive(Debug, Clone)]
pub struct AuditPage {
    /// Matching entries after the limit was applied
    pub entries: Vec<AuditEntry>,
    /// Matching entries before the limit was applied
    pub matched: usize,
}

impl AuditPage {
    /// Whether the limit cut off older matches
    pub fn is_truncated(&self) -> bool {
        self.matched > self.entries.len()
    }
}

/// Writes and reads the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a logger for the log file at `log_path`
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> VaultResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single open and flush
    ///
    /// Creates the log's directory on first use.
    pub fn log_batch(&self, entries: &[AuditEntry]) -> VaultResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| VaultError::Io(format!("Failed to create audit log directory: {}", e)))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| VaultError::Io(format!("Failed to open audit log: {}", e)))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            serde_json::to_writer(&mut writer, entry)
                .map_err(|e| VaultError::Json(format!("Failed to serialize audit entry: {}", e)))?;
            writer
                .write_all(b"\n")
                .map_err(|e| VaultError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| VaultError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read every entry, oldest first
    ///
    /// A missing log reads as empty. A line that is not valid JSON is an
    /// error naming its line number.
    pub fn read_all(&self) -> VaultResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VaultError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_num = index + 1;
            let line = line.map_err(|e| {
                VaultError::Io(format!("Failed to read audit log line {}: {}", line_num, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                VaultError::Json(format!("Failed to parse audit entry at line {}: {}", line_num, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the entries matching `query`, oldest first
    pub fn query(&self, query: &AuditQuery) -> VaultResult<AuditPage> {
        let mut entries: Vec<AuditEntry> = self
            .read_all()?
            .into_iter()
            .filter(|entry| query.matches(entry))
            .collect();

        let matched = entries.len();
        if let Some(limit) = query.limit {
            entries.drain(..matched.saturating_sub(limit));
        }

        Ok(AuditPage { entries, matched })
    }
}
