//! Core data models for Statement Vault
//!
//! This module contains the structured statement record that the backup codec
//! reads and writes: the statement header, its transactions, and the small
//! value types they are built from.

pub mod amount;
pub mod ids;
pub mod statement;
pub mod transaction;

pub use amount::{Amount, AmountParseError};
pub use ids::StatementId;
pub use statement::StatementRecord;
pub use transaction::{TransactionRecord, TransactionType};
