//! Audit entry data structures
//!
//! Defines the structure of audit log entries: what was done, to which
//! statement or backup, and a small JSON payload of details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{DecodeReport, EncodeSummary};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A statement was written as backup text
    Encode,
    /// Backup text was read back into a statement
    Decode,
    /// A dated backup was created
    Backup,
    /// A backup was restored into the statements directory
    Restore,
    /// Old backups were deleted by the retention policy
    Prune,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Encode => write!(f, "ENCODE"),
            Operation::Decode => write!(f, "DECODE"),
            Operation::Backup => write!(f, "BACKUP"),
            Operation::Restore => write!(f, "RESTORE"),
            Operation::Prune => write!(f, "PRUNE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Statement,
    Backup,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Statement => write!(f, "Statement"),
            EntityType::Backup => write!(f, "Backup"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// ID of the affected entity (statement id or backup filename)
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., bank name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Operation-specific details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create a new audit entry
    pub fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            details: None,
        }
    }

    /// Attach details to the entry
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Entry for a finished encode
    pub fn encoded(summary: &EncodeSummary, bank_name: &str, target: &str) -> Self {
        Self::new(
            Operation::Encode,
            EntityType::Statement,
            summary.statement_id.as_str(),
            non_empty(bank_name),
        )
        .with_details(serde_json::json!({
            "rows": summary.rows_written,
            "saved_at": summary.saved_at,
            "target": target,
        }))
    }

    /// Entry for a finished decode
    ///
    /// Records dropped rows and extra headers so lossy decodes can be found
    /// after the fact.
    pub fn decoded(report: &DecodeReport, source: &str) -> Self {
        let statement = &report.statement;
        Self::new(
            Operation::Decode,
            EntityType::Statement,
            statement
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            non_empty(&statement.bank_name),
        )
        .with_details(serde_json::json!({
            "source": source,
            "rows": statement.transactions.len(),
            "dropped_rows": report.dropped_rows,
            "metadata_blocks": report.metadata_blocks,
        }))
    }

    /// Format the entry as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            line.push_str(&format!(" ({})", name));
        }

        if let Some(serde_json::Value::Object(map)) = &self.details {
            let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            if !parts.is_empty() {
                line.push_str(&format!(" {{{}}}", parts.join(", ")));
            }
        }

        line
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_with_report;
    use crate::codec::encode;
    use crate::models::{StatementId, StatementRecord, TransactionRecord};
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Encode.to_string(), "ENCODE");
        assert_eq!(Operation::Prune.to_string(), "PRUNE");
    }

    #[test]
    fn test_encoded_entry() {
        let summary = EncodeSummary {
            statement_id: StatementId::new("s1"),
            saved_at: 10,
            rows_written: 3,
        };
        let entry = AuditEntry::encoded(&summary, "Bank A", "out.sql");

        assert_eq!(entry.operation, Operation::Encode);
        assert_eq!(entry.entity_id, "s1");
        assert_eq!(entry.entity_name.as_deref(), Some("Bank A"));
        assert_eq!(entry.details.unwrap()["rows"], 3);
    }

    #[test]
    fn test_decoded_entry_records_drops() {
        let mut statement = StatementRecord::new("").with_id("s9");
        statement.push(TransactionRecord::new("d", 1.0, "x"));
        let mut text = encode(&statement);
        text.push_str("INSERT INTO transactions VALUES ('s9', 'short');");

        let report = decode_with_report(&text).unwrap();
        let entry = AuditEntry::decoded(&report, "in.sql");

        assert_eq!(entry.entity_id, "s9");
        assert!(entry.entity_name.is_none());
        let details = entry.details.unwrap();
        assert_eq!(details["rows"], 1);
        assert_eq!(details["dropped_rows"], 1);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::new(Operation::Prune, EntityType::Backup, "backup-1.sql", None);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["operation"], "prune");
        assert_eq!(value["entity_type"], "backup");
        assert!(value.get("entity_name").is_none());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_format_human_readable() {
        let entry = AuditEntry::new(
            Operation::Restore,
            EntityType::Statement,
            "s1",
            Some("Bank A".into()),
        )
        .with_details(json!({"rows": 2}));

        let line = entry.format_human_readable();
        assert!(line.contains("RESTORE Statement s1 (Bank A)"));
        assert!(line.contains("{rows=2}"));
    }
}
