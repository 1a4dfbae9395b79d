use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use statement_vault::cli::{
    handle_backup_command, handle_decode, handle_encode, handle_history, handle_inspect,
    BackupCommands, DecodeFormat,
};
use statement_vault::audit::{AuditQuery, Operation};
use statement_vault::config::{paths::VaultPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "vault",
    version,
    about = "Archive and restore bank statements as SQL-like backups",
    long_about = "Statement Vault writes bank statements as human-readable SQL-like \
                  text and reads them back, recovering every complete transaction \
                  row even from damaged or hand-edited files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a statement JSON file as backup text
    Encode {
        /// Statement JSON file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode backup text into JSON or CSV
    Decode {
        /// Backup file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },

    /// Summarize a backup file
    Inspect {
        /// Backup file
        input: PathBuf,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only entries about this statement id or backup file
        #[arg(short, long)]
        statement: Option<String>,

        /// Only entries for this operation
        #[arg(short, long, value_enum)]
        operation: Option<Operation>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Encode { input, output }) => {
            handle_encode(&paths, &settings, &input, output.as_deref())?;
        }
        Some(Commands::Decode {
            input,
            output,
            format,
        }) => {
            handle_decode(&paths, &settings, &input, output.as_deref(), format)?;
        }
        Some(Commands::Inspect { input, limit }) => {
            handle_inspect(&input, limit)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::History {
            limit,
            statement,
            operation,
        }) => {
            let query = AuditQuery {
                entity_id: statement,
                operation,
                limit: Some(limit),
            };
            handle_history(&paths, &query)?;
        }
        Some(Commands::Config) => {
            println!("Statement Vault Configuration");
            println!("=============================");
            println!("Base directory:       {}", paths.base_dir().display());
            println!("Backup directory:     {}", paths.backup_dir().display());
            println!("Statements directory: {}", paths.statements_dir().display());
            println!("Audit log:            {}", paths.audit_log().display());
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
                println!("Settings file:        {} (created)", paths.settings_file().display());
            } else {
                println!("Settings file:        {}", paths.settings_file().display());
            }
            println!();
            println!("Settings:");
            println!(
                "  Backup retention: {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            println!("  Audit enabled:    {}", settings.audit_enabled);
            println!("  Pretty JSON:      {}", settings.pretty_json);
        }
        None => {
            println!("Statement Vault - SQL-like backups for bank statements");
            println!();
            println!("Run 'vault --help' for usage information.");
        }
    }

    Ok(())
}
