//! Encode, decode and inspect commands
//!
//! Convert between statement JSON and backup text, writing to a file when
//! an output path is given and to stdout otherwise.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::audit::AuditEntry;
use crate::codec::{decode_with_report, DecodeReport, Encoder};
use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::display::{format_statement_summary, format_transaction_register};
use crate::error::VaultResult;
use crate::export::{export_transactions_csv, read_statement_json, write_statement_json};
use crate::storage::{read_text, write_atomic};

use super::record_audit;

/// Output format for decoded backups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DecodeFormat {
    /// Statement document (camelCase JSON)
    #[default]
    Json,
    /// Transaction register as CSV
    Csv,
}

/// Encode a statement JSON file into backup text
pub fn handle_encode(
    paths: &VaultPaths,
    settings: &Settings,
    input: &Path,
    output: Option<&Path>,
) -> VaultResult<()> {
    let statement = read_statement_json(&read_text(input)?)?;
    let encoder = Encoder::new(&statement);

    let (summary, target) = match output {
        Some(path) => {
            let mut summary = None;
            write_atomic(path, |writer| {
                summary = Some(encoder.write_to(writer)?);
                Ok(())
            })?;
            eprintln!("Wrote {}", path.display());
            (summary, path.display().to_string())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            (Some(encoder.write_to(&mut handle)?), "stdout".to_string())
        }
    };

    if let Some(summary) = summary {
        record_audit(
            paths,
            settings,
            &[AuditEntry::encoded(&summary, &statement.bank_name, &target)],
        )?;
    }

    Ok(())
}

/// Decode a backup file into JSON or CSV
pub fn handle_decode(
    paths: &VaultPaths,
    settings: &Settings,
    input: &Path,
    output: Option<&Path>,
    format: DecodeFormat,
) -> VaultResult<()> {
    let report = decode_with_report(&read_text(input)?)?;

    match output {
        Some(path) => {
            write_atomic(path, |writer| write_decoded(&report, writer, format, settings.pretty_json))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_decoded(&report, &mut handle, format, settings.pretty_json)?;
        }
    }

    if report.dropped_rows > 0 {
        eprintln!(
            "Warning: skipped {} incomplete transaction row(s)",
            report.dropped_rows
        );
    }

    record_audit(
        paths,
        settings,
        &[AuditEntry::decoded(&report, &input.display().to_string())],
    )
}

/// Print a summary of a backup file without converting it
pub fn handle_inspect(input: &Path, limit: Option<usize>) -> VaultResult<()> {
    let report = decode_with_report(&read_text(input)?)?;
    let statement = &report.statement;

    println!("{}", format_statement_summary(statement));
    println!("Transaction inserts: {}", report.transaction_blocks);
    println!("Rows read:           {}", report.tuples_seen);
    println!("Rows skipped:        {}", report.dropped_rows);
    if report.metadata_blocks > 1 {
        println!(
            "Statement headers:   {} (first one used)",
            report.metadata_blocks
        );
    }
    println!();

    let shown = match limit {
        Some(limit) => &statement.transactions[..limit.min(statement.transactions.len())],
        None => &statement.transactions[..],
    };
    print!("{}", format_transaction_register(shown));

    if shown.len() < statement.transactions.len() {
        println!(
            "... {} more transaction(s)",
            statement.transactions.len() - shown.len()
        );
    }

    Ok(())
}

fn write_decoded<W: Write>(
    report: &DecodeReport,
    writer: &mut W,
    format: DecodeFormat,
    pretty: bool,
) -> VaultResult<()> {
    match format {
        DecodeFormat::Json => write_statement_json(&report.statement, writer, pretty),
        DecodeFormat::Csv => export_transactions_csv(&report.statement, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::codec::decode;
    use std::fs;
    use tempfile::TempDir;

    const STATEMENT_JSON: &str = r#"{
        "id": "s1",
        "bankName": "Bank A",
        "savedAt": 1700000000000,
        "transactions": [
            {"date": "01/01/2024", "amount": -50000, "description": "x", "type": "DEBIT"}
        ]
    }"#;

    fn setup() -> (VaultPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().join("vault"));
        (paths, temp_dir)
    }

    #[test]
    fn test_encode_then_decode_files() {
        let (paths, temp) = setup();
        let settings = Settings::default();
        let json_path = temp.path().join("statement.json");
        let sql_path = temp.path().join("statement.sql");
        let csv_path = temp.path().join("statement.csv");
        fs::write(&json_path, STATEMENT_JSON).unwrap();

        handle_encode(&paths, &settings, &json_path, Some(&sql_path)).unwrap();
        let decoded = decode(&fs::read_to_string(&sql_path).unwrap()).unwrap();
        assert_eq!(decoded.bank_name, "Bank A");
        assert_eq!(decoded.saved_at, Some(1700000000000));

        handle_decode(&paths, &settings, &sql_path, Some(&csv_path), DecodeFormat::Csv).unwrap();
        let csv_text = fs::read_to_string(&csv_path).unwrap();
        assert!(csv_text.contains("01/01/2024,-50000.00,x,,,,DEBIT,"));

        let entries = AuditLogger::new(paths.audit_log()).read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Encode);
        assert_eq!(entries[1].operation, Operation::Decode);
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let (paths, temp) = setup();
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let json_path = temp.path().join("statement.json");
        fs::write(&json_path, STATEMENT_JSON).unwrap();

        handle_encode(&paths, &settings, &json_path, Some(&temp.path().join("o.sql"))).unwrap();
        assert!(!paths.audit_log().exists());
    }

    #[test]
    fn test_decode_corrupt_file_leaves_no_output() {
        let (paths, temp) = setup();
        let sql_path = temp.path().join("bad.sql");
        let out_path = temp.path().join("out.json");
        fs::write(&sql_path, "nothing here").unwrap();

        let err = handle_decode(&paths, &Settings::default(), &sql_path, Some(&out_path), DecodeFormat::Json)
            .unwrap_err();
        assert!(err.is_corrupt_backup());
        assert!(!out_path.exists());
    }
}
