//! Export module for Statement Vault
//!
//! Converts statements to and from the formats that sit beside the backup
//! text:
//! - JSON: the statement document the encoder reads and restore writes
//! - CSV: the transaction register, spreadsheet-compatible

pub mod csv;
pub mod json;

pub use csv::{export_transactions_csv, CSV_HEADER};
pub use json::{read_statement_json, validate_statement, write_statement_json};
