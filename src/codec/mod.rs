//! Backup codec for Statement Vault
//!
//! Turns a [`StatementRecord`](crate::models::StatementRecord) into a
//! human-readable SQL-style text document and back again.
//!
//! # Architecture
//!
//! - `literal`: escaping of single values and extraction of typed values
//!   from the inside of a tuple
//! - `schema`: table names, column lists, preamble and insert markers
//! - `scanner`: quote-aware state machine that finds every top-level tuple
//!   across any number of insert blocks
//! - `metadata`: locates the single statement header
//! - `encoder` / `decoder`: the two directions
//!
//! # Format
//!
//! ```text
//! -- Statement Vault backup
//! CREATE TABLE IF NOT EXISTS statements (...);
//! CREATE TABLE IF NOT EXISTS transactions (...);
//!
//! INSERT INTO statements (id, fileName, bankName, accountHolder, period, savedAt) VALUES ('s1', 'jan.pdf', 'Bank A', 'Jane', '01/2024', 1700000000000);
//!
//! INSERT INTO transactions (statementId, date, amount, ...) VALUES
//! ('s1', '01/01/2024', -50000, 'ATM fee', '', '', '', 'DEBIT', 'Fees'),
//! ('s1', '02/01/2024', 200000, 'Salary', '', 'ACME', '', 'CREDIT', 'Income');
//! ```
//!
//! Several backups concatenated into one file decode as one statement: the
//! first header wins and the transactions of every block are kept in order.
//!
//! # Example
//!
//! ```rust
//! use statement_vault::codec::{decode, encode};
//! use statement_vault::models::{StatementRecord, TransactionRecord};
//!
//! let mut statement = StatementRecord::new("Bank A").with_id("s1");
//! statement.push(TransactionRecord::new("01/01/2024", -50000.0, "ATM fee"));
//!
//! let restored = decode(&encode(&statement)).unwrap();
//! assert_eq!(restored.transactions, statement.transactions);
//! ```

pub mod decoder;
pub mod encoder;
pub mod literal;
pub mod metadata;
pub mod scanner;
pub mod schema;

pub use decoder::{decode, decode_with_report, DecodeReport};
pub use encoder::{encode, write_backup, EncodeSummary, Encoder};
pub use literal::{escape_literal, extract_values, SqlValue};
pub use metadata::{locate_metadata, MetadataBlock};
pub use scanner::{find_marker, scan_tuples, BlockScan, TupleScanner};
