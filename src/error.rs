//! Custom error types for Statement Vault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Statement Vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A backup document could not be decoded.
    ///
    /// The user only ever sees the generic message; the underlying reason is
    /// kept as the error source.
    #[error("Backup file is corrupt or in the wrong format")]
    CorruptBackup(#[source] DecodeError),
}

/// Fatal reasons a backup document cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No statement insert was found anywhere in the document
    #[error("no statement metadata block found")]
    MissingMetadataBlock,

    /// The statement tuple had fewer values than the header requires
    #[error("statement metadata has {found} values, expected at least {expected}")]
    MalformedMetadataFields { found: usize, expected: usize },
}

impl VaultError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a corrupt backup error
    pub fn is_corrupt_backup(&self) -> bool {
        matches!(self, Self::CorruptBackup(_))
    }

    /// The decode failure behind a corrupt backup error, if any
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::CorruptBackup(reason) => Some(reason),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<DecodeError> for VaultError {
    fn from(err: DecodeError) -> Self {
        Self::CorruptBackup(err)
    }
}

/// Result type alias for Statement Vault operations
pub type VaultResult<T> = Result<T, VaultError>;
