//! Backup decoder
//!
//! Reassembles a [`StatementRecord`] from backup text. Only two things are
//! fatal: no statement header, or a header with fewer than six values. Every
//! other irregularity is absorbed. Short transaction tuples are dropped,
//! unreadable values are skipped, and missing fields take their defaults.

use crate::error::{DecodeError, VaultResult};
use crate::models::{Amount, StatementId, StatementRecord, TransactionRecord, TransactionType};

use super::literal::{extract_values, SqlValue};
use super::metadata::locate_metadata;
use super::scanner::TupleScanner;
use super::schema::{transaction_marker, STATEMENT_COLUMN_COUNT, TRANSACTION_COLUMN_COUNT};

/// A decoded statement plus what was discarded along the way
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    /// The decoded statement
    pub statement: StatementRecord,
    /// Complete transaction tuples found
    pub tuples_seen: usize,
    /// Tuples dropped for having too few values
    pub dropped_rows: usize,
    /// Transaction inserts found
    pub transaction_blocks: usize,
    /// Statement inserts found; only the first is used
    pub metadata_blocks: usize,
}

impl DecodeReport {
    /// Whether anything in the document was ignored
    pub fn is_lossy(&self) -> bool {
        self.dropped_rows > 0 || self.metadata_blocks > 1
    }
}

/// Decode backup text into a statement
pub fn decode(text: &str) -> VaultResult<StatementRecord> {
    decode_with_report(text).map(|report| report.statement)
}

/// Decode backup text, reporting dropped rows and extra headers
pub fn decode_with_report(text: &str) -> VaultResult<DecodeReport> {
    let metadata = locate_metadata(text)?;
    if metadata.values.len() < STATEMENT_COLUMN_COUNT {
        return Err(DecodeError::MalformedMetadataFields {
            found: metadata.values.len(),
            expected: STATEMENT_COLUMN_COUNT,
        }
        .into());
    }

    let mut statement = statement_from_values(&metadata.values);

    let mut scanner = TupleScanner::new(text, transaction_marker());
    let mut tuples_seen = 0;
    let mut dropped_rows = 0;
    for inner in scanner.by_ref() {
        tuples_seen += 1;
        match transaction_from_values(&extract_values(inner)) {
            Some(txn) => statement.transactions.push(txn),
            None => dropped_rows += 1,
        }
    }

    Ok(DecodeReport {
        statement,
        tuples_seen,
        dropped_rows,
        transaction_blocks: scanner.blocks_seen(),
        metadata_blocks: metadata.occurrences,
    })
}

/// Build the statement header from its six values
fn statement_from_values(values: &[SqlValue]) -> StatementRecord {
    let id = text_at(values, 0);

    StatementRecord {
        id: if id.is_empty() {
            None
        } else {
            Some(StatementId::new(id))
        },
        file_name: text_at(values, 1),
        bank_name: text_at(values, 2),
        account_holder: text_at(values, 3),
        period: text_at(values, 4),
        saved_at: values
            .get(5)
            .and_then(SqlValue::as_integer),
        transactions: Vec::new(),
    }
}

/// Build a transaction from one tuple, or `None` if it is too short
///
/// Column 0 repeats the statement id and is not stored per transaction.
fn transaction_from_values(values: &[SqlValue]) -> Option<TransactionRecord> {
    if values.len() < TRANSACTION_COLUMN_COUNT {
        return None;
    }

    let amount = values
        .get(2)
        .and_then(SqlValue::as_number)
        .map(Amount::new)
        .unwrap_or_default();

    Some(TransactionRecord {
        date: text_at(values, 1),
        amount,
        description: text_at(values, 3),
        transaction_code: text_at(values, 4),
        partner_name: text_at(values, 5),
        partner_account: text_at(values, 6),
        transaction_type: TransactionType::from_token(&text_at(values, 7)),
        category: text_at(values, 8),
    })
}

/// Text value at `index`, empty when absent or null
fn text_at(values: &[SqlValue], index: usize) -> String {
    values
        .get(index)
        .and_then(SqlValue::as_text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    const HEADER: &str = "INSERT INTO statements VALUES ('s1', 'f.pdf', 'Bank A', 'Jane', '01/2024', 1700000000000);\n";

    #[test]
    fn test_decode_minimal() {
        let text = format!(
            "{}INSERT INTO transactions VALUES ('s1', '01/01/2024', -50000, 'ATM fee', 'C1', 'P', '123', 'DEBIT', 'Fees');",
            HEADER
        );
        let statement = decode(&text).unwrap();

        assert_eq!(statement.id, Some(StatementId::new("s1")));
        assert_eq!(statement.bank_name, "Bank A");
        assert_eq!(statement.saved_at, Some(1_700_000_000_000));
        assert_eq!(statement.transactions.len(), 1);

        let txn = &statement.transactions[0];
        assert_eq!(txn.amount, Amount::new(-50000.0));
        assert_eq!(txn.transaction_code, "C1");
        assert_eq!(txn.partner_account, "123");
        assert_eq!(txn.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_missing_metadata_fails() {
        let text = "INSERT INTO transactions VALUES ('s1', '01/01/2024', 1, 'a', '', '', '', 'DEBIT', '');";
        let err = decode(text).unwrap_err();
        assert!(err.is_corrupt_backup());
        assert_eq!(err.decode_error(), Some(&DecodeError::MissingMetadataBlock));
    }

    #[test]
    fn test_short_metadata_fails() {
        let text = "INSERT INTO statements VALUES ('s1', 'f.pdf', 'Bank A');";
        let err = decode(text).unwrap_err();
        assert_eq!(
            err.decode_error(),
            Some(&DecodeError::MalformedMetadataFields {
                found: 3,
                expected: 6
            })
        );
    }

    #[test]
    fn test_short_tuple_is_dropped() {
        let text = format!(
            "{}INSERT INTO transactions VALUES \
             ('s1', 'd1', 1, 'a', '', '', '', 'CREDIT', ''),\n\
             ('s1', 'd2', 2, 'b', ''),\n\
             ('s1', 'd3', 3, 'c', '', '', '', 'DEBIT', '');",
            HEADER
        );
        let report = decode_with_report(&text).unwrap();
        assert_eq!(report.tuples_seen, 3);
        assert_eq!(report.dropped_rows, 1);
        assert!(report.is_lossy());

        let dates: Vec<_> = report.statement.transactions.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["d1", "d3"]);
    }

    #[test]
    fn test_field_defaults() {
        let text = format!(
            "{}INSERT INTO transactions VALUES ('s1', NULL, 'oops', NULL, 7, NULL, NULL, 'credit', NULL);",
            HEADER
        );
        let statement = decode(&text).unwrap();
        let txn = &statement.transactions[0];
        assert_eq!(txn.date, "");
        assert_eq!(txn.amount, Amount::zero());
        assert_eq!(txn.transaction_code, "7");
        assert_eq!(txn.transaction_type, TransactionType::Debit);
        assert_eq!(txn.category, "");
    }

    #[test]
    fn test_numeric_text_amount_is_accepted() {
        let text = format!(
            "{}INSERT INTO transactions VALUES ('s1', 'd', '-12.5', '', '', '', '', 'DEBIT', '');",
            HEADER
        );
        let statement = decode(&text).unwrap();
        assert_eq!(statement.transactions[0].amount, Amount::new(-12.5));
    }

    #[test]
    fn test_header_with_null_id_and_text_saved_at() {
        let text = "INSERT INTO statements VALUES (NULL, 'f', 'b', 'h', 'p', 'later');";
        let statement = decode(text).unwrap();
        assert_eq!(statement.id, None);
        assert_eq!(statement.saved_at, None);
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn test_multiple_headers_reported() {
        let text = format!("{}{}", HEADER, HEADER.replace("'s1'", "'s2'"));
        let report = decode_with_report(&text).unwrap();
        assert_eq!(report.metadata_blocks, 2);
        assert_eq!(report.statement.id, Some(StatementId::new("s1")));
        assert!(report.is_lossy());
    }

    #[test]
    fn test_round_trip_through_encoder() {
        let mut statement = StatementRecord::new("Bank A").with_id("s1");
        statement.saved_at = Some(42);
        statement.push(TransactionRecord::new("01/01/2024", -50000.0, "ATM fee").with_category("Fees"));

        let report = decode_with_report(&encode(&statement)).unwrap();
        assert_eq!(report.statement, statement);
        assert_eq!(report.transaction_blocks, 1);
        assert!(!report.is_lossy());
    }

    #[test]
    fn test_saved_at_beyond_f64_precision() {
        let mut statement = StatementRecord::new("Bank A").with_id("s1");
        statement.saved_at = Some(9_007_199_254_740_993);

        let decoded = decode(&encode(&statement)).unwrap();
        assert_eq!(decoded.saved_at, Some(9_007_199_254_740_993));
    }
}
