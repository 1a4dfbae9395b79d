//! End-to-end tests for the `vault` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STATEMENT_JSON: &str = r#"{
    "id": "s1",
    "bankName": "Bank A",
    "accountHolder": "Jane Doe",
    "period": "01/2024",
    "savedAt": 1704067200000,
    "transactions": [
        {"date": "01/01/2024", "amount": -50000, "description": "ATM fee", "type": "DEBIT", "category": "Fees"},
        {"date": "02/01/2024", "amount": 1200.5, "description": "O'Brien's \"gift\"", "type": "CREDIT"}
    ]
}"#;

fn vault(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vault").unwrap();
    cmd.env("STATEMENT_VAULT_DIR", home.join("vault"));
    cmd
}

fn write_statement(dir: &Path) -> PathBuf {
    let path = dir.join("statement.json");
    fs::write(&path, STATEMENT_JSON).unwrap();
    path
}

#[test]
fn encode_to_stdout() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());

    vault(temp.path())
        .arg("encode")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS statements"))
        .stdout(predicate::str::contains("'O''Brien''s \"gift\"'"))
        .stdout(predicate::str::contains("-50000"));
}

#[test]
fn encode_then_decode_as_csv() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());
    let backup = temp.path().join("statement.sql");

    vault(temp.path())
        .args(["encode", "-o"])
        .arg(&backup)
        .arg(&input)
        .assert()
        .success();

    vault(temp.path())
        .arg("decode")
        .arg(&backup)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Date,Amount,Description,Code,Partner,Partner Account,Type,Category",
        ))
        .stdout(predicate::str::contains("01/01/2024,-50000.00,ATM fee,,,,DEBIT,Fees"));
}

#[test]
fn decode_reports_skipped_rows() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("partial.sql");
    fs::write(
        &backup,
        "INSERT INTO statements VALUES ('s2', '', 'Bank B', '', '', 1);\n\
         INSERT INTO transactions VALUES ('s2', '01/01', 5, 'ok', '', '', '', 'CREDIT', ''),\n\
         ('s2', 'short');",
    )
    .unwrap();

    vault(temp.path())
        .arg("decode")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bankName\": \"Bank B\""))
        .stderr(predicate::str::contains("skipped 1 incomplete transaction row"));
}

#[test]
fn decode_corrupt_file_fails() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("bad.sql");
    fs::write(&backup, "SELECT 1;").unwrap();

    vault(temp.path())
        .arg("decode")
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt or in the wrong format"));
}

#[test]
fn inspect_shows_summary_and_register() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());
    let backup = temp.path().join("statement.sql");

    vault(temp.path())
        .args(["encode", "-o"])
        .arg(&backup)
        .arg(&input)
        .assert()
        .success();

    vault(temp.path())
        .arg("inspect")
        .arg(&backup)
        .args(["--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank:        Bank A"))
        .stdout(predicate::str::contains("Rows skipped:        0"))
        .stdout(predicate::str::contains("ATM fee"))
        .stdout(predicate::str::contains("... 1 more transaction(s)"));
}

#[test]
fn backup_create_list_and_restore() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());

    vault(temp.path())
        .args(["backup", "create"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: backup-"));

    vault(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));

    vault(temp.path())
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    let restored = temp.path().join("vault/statements/s1.json");
    assert!(!restored.exists());

    vault(temp.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored statement s1 with 2 transaction(s)"));

    let json = fs::read_to_string(&restored).unwrap();
    assert!(json.contains("O'Brien's \\\"gift\\\""));
}

#[test]
fn backup_restore_unknown_name_fails() {
    let temp = TempDir::new().unwrap();

    vault(temp.path())
        .args(["backup", "restore", "backup-19990101-000000.sql"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn history_lists_operations() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());

    vault(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history recorded yet."));

    vault(temp.path())
        .args(["encode", "-o"])
        .arg(temp.path().join("out.sql"))
        .arg(&input)
        .assert()
        .success();

    vault(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENCODE Statement s1 (Bank A)"));
}

#[test]
fn history_filters_by_statement_and_operation() {
    let temp = TempDir::new().unwrap();
    let input = write_statement(temp.path());

    vault(temp.path())
        .args(["encode", "-o"])
        .arg(temp.path().join("out.sql"))
        .arg(&input)
        .assert()
        .success();

    vault(temp.path())
        .args(["history", "--statement", "s1", "--operation", "encode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENCODE Statement s1"));

    vault(temp.path())
        .args(["history", "--operation", "restore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching history."));

    vault(temp.path())
        .args(["history", "--statement", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching history."));
}

#[test]
fn config_shows_paths() {
    let temp = TempDir::new().unwrap();

    vault(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup directory:"))
        .stdout(predicate::str::contains("30 daily, 12 monthly"));

    assert!(temp.path().join("vault/config.json").exists());
}
