//! Path management for Statement Vault
//!
//! Provides XDG-compliant path resolution for configuration, backups, and
//! restored statements.
//!
//! ## Path Resolution Order
//!
//! 1. `STATEMENT_VAULT_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/statement-vault` or `~/.config/statement-vault`
//! 3. Windows: `%APPDATA%\statement-vault`

use std::path::PathBuf;

use crate::error::VaultError;
use crate::models::StatementId;

/// Environment variable that overrides the base directory
pub const VAULT_DIR_ENV: &str = "STATEMENT_VAULT_DIR";

/// Manages all paths used by Statement Vault
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Base directory for all Statement Vault data
    base_dir: PathBuf,
}

impl VaultPaths {
    /// Create a new VaultPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = match std::env::var(VAULT_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create VaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/statement-vault/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the backup directory (~/.config/statement-vault/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the directory restored statements are written to
    pub fn statements_dir(&self) -> PathBuf {
        self.base_dir.join("statements")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path a restored statement is written to
    ///
    /// Bytes outside `[A-Za-z0-9_-]` are written as `~XX` (hex), so distinct
    /// ids always get distinct file names.
    pub fn statement_file(&self, id: &StatementId) -> PathBuf {
        let mut name = String::with_capacity(id.as_str().len() + 5);
        for b in id.as_str().bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                name.push(b as char);
            } else {
                name.push_str(&format!("~{:02X}", b));
            }
        }
        name.push_str(".json");
        self.statements_dir().join(name)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.statements_dir()).map_err(|e| {
            VaultError::Io(format!("Failed to create statements directory: {}", e))
        })?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| VaultError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("statement-vault"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VaultError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("statement-vault"))
}
