//! Storage layer for Statement Vault
//!
//! Plain files only: backups are text, restored statements are JSON, and
//! every write goes through a temp file and an atomic rename.

pub mod file_io;

pub use file_io::{read_json_required, read_text, write_atomic, write_json_atomic};
