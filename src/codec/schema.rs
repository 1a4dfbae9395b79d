//! Fixed layout of the backup document
//!
//! Two logical tables with fixed column lists. Column order here is the
//! order of values in every tuple.

use std::sync::OnceLock;

use regex::Regex;

/// Table holding the single statement header row
pub const STATEMENTS_TABLE: &str = "statements";

/// Table holding one row per transaction
pub const TRANSACTIONS_TABLE: &str = "transactions";

/// Statement header columns, in tuple order
pub const STATEMENT_COLUMNS: [&str; 6] = [
    "id",
    "fileName",
    "bankName",
    "accountHolder",
    "period",
    "savedAt",
];

/// Transaction columns, in tuple order
pub const TRANSACTION_COLUMNS: [&str; 9] = [
    "statementId",
    "date",
    "amount",
    "description",
    "transactionCode",
    "partnerName",
    "partnerAccount",
    "type",
    "category",
];

/// Values a statement tuple needs to be usable
pub const STATEMENT_COLUMN_COUNT: usize = STATEMENT_COLUMNS.len();

/// Values a transaction tuple needs to be kept
pub const TRANSACTION_COLUMN_COUNT: usize = TRANSACTION_COLUMNS.len();

/// Separator between transaction tuples
pub const ROW_SEPARATOR: &str = ",\n";

/// Statement terminator
pub const TERMINATOR: char = ';';

/// Static table declarations written at the top of every backup
pub const PREAMBLE: &str = "\
-- Statement Vault backup
CREATE TABLE IF NOT EXISTS statements (
  id TEXT PRIMARY KEY,
  fileName TEXT,
  bankName TEXT,
  accountHolder TEXT,
  period TEXT,
  savedAt INTEGER
);
CREATE TABLE IF NOT EXISTS transactions (
  statementId TEXT,
  date TEXT,
  amount REAL,
  description TEXT,
  transactionCode TEXT,
  partnerName TEXT,
  partnerAccount TEXT,
  type TEXT,
  category TEXT
);
";

/// Marker that opens the value list of a statement insert
pub fn statement_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| insert_marker(STATEMENTS_TABLE))
}

/// Marker that opens the value list of a transaction insert
pub fn transaction_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| insert_marker(TRANSACTIONS_TABLE))
}

/// `INSERT INTO <table> [(columns)] VALUES`, any letter case
fn insert_marker(table: &str) -> Regex {
    let pattern = format!(
        r"(?i)\bINSERT\s+INTO\s+{}\s*(?:\([^)]*\))?\s*VALUES\b",
        regex::escape(table)
    );
    Regex::new(&pattern).expect("insert marker pattern is valid")
}

/// Column list joined for an insert header
pub fn column_list(columns: &[&str]) -> String {
    columns.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_with_and_without_columns() {
        let marker = transaction_marker();
        assert!(marker.is_match("INSERT INTO transactions VALUES"));
        assert!(marker.is_match("insert into transactions (statementId, date)\n VALUES"));
        assert!(marker.is_match("INSERT   INTO transactions(a,b)VALUES ("));
    }

    #[test]
    fn test_markers_do_not_cross_tables() {
        assert!(!transaction_marker().is_match("INSERT INTO statements VALUES"));
        assert!(!statement_marker().is_match("INSERT INTO transactions VALUES"));
        assert!(!transaction_marker().is_match("INSERT INTO transactions_old VALUES"));
    }

    #[test]
    fn test_preamble_is_not_a_marker() {
        assert!(!statement_marker().is_match(PREAMBLE));
        assert!(!transaction_marker().is_match(PREAMBLE));
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(STATEMENT_COLUMN_COUNT, 6);
        assert_eq!(TRANSACTION_COLUMN_COUNT, 9);
        assert_eq!(column_list(&STATEMENT_COLUMNS[..2]), "id, fileName");
    }
}
