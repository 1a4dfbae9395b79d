//! Statement Vault - human-readable SQL backups for bank statements
//!
//! This library turns a bank statement (header plus transactions) into a
//! SQL-like text document and reads such documents back. The reader is
//! lenient: it recovers every complete row it can find and only gives up
//! when the statement header itself is missing or truncated.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `codec`: the backup text encoder and decoder
//! - `models`: statements, transactions, amounts and ids
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `storage`: atomic file writes
//! - `export`: statement JSON and transaction CSV
//! - `audit`: audit logging system
//! - `backup`: dated backups with retention, and restore
//! - `display`: terminal formatting
//! - `cli`: command handlers for the `vault` binary
//!
//! # Example
//!
//! ```rust
//! use statement_vault::codec::{decode, encode};
//! use statement_vault::models::{StatementRecord, TransactionRecord};
//!
//! let mut statement = StatementRecord::new("Bank A").with_id("s1");
//! statement.push(TransactionRecord::new("01/01/2024", -50000.0, "ATM"));
//!
//! let text = encode(&statement);
//! let restored = decode(&text).unwrap();
//! assert_eq!(restored.transactions, statement.transactions);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;

pub use error::{VaultError, VaultResult};
