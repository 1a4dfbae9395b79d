//! Display formatting for terminal output
//!
//! Formats statements and their transaction registers for the CLI.

pub mod statement;

pub use statement::{
    format_statement_summary, format_transaction_register, format_transaction_row,
};
