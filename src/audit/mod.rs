//! Audit logging system for Statement Vault
//!
//! Records every encode, decode, backup, restore and prune in an append-only
//! audit log. The codec itself never reports dropped rows to its caller; the
//! audit log is where those counts end up.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, entity
//!   information and optional JSON details.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL), and reads them back through an
//!   `AuditQuery` filtered by statement and operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use statement_vault::audit::{AuditEntry, AuditLogger};
//! use statement_vault::codec::decode_with_report;
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let report = decode_with_report(&text)?;
//! logger.log(&AuditEntry::decoded(&report, "backup.sql"))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{AuditLogger, AuditPage, AuditQuery};
