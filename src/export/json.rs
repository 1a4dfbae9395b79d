//! JSON statement documents
//!
//! Reads statement JSON supplied by the user and writes decoded statements
//! back out in the same camelCase shape.

use std::io::Write;

use crate::error::{VaultError, VaultResult};
use crate::models::StatementRecord;

/// Parse a statement document, rejecting records the encoder can't store faithfully
pub fn read_statement_json(json_str: &str) -> VaultResult<StatementRecord> {
    let record: StatementRecord =
        serde_json::from_str(json_str).map_err(|e| VaultError::Import(e.to_string()))?;

    validate_statement(&record).map_err(VaultError::Import)?;

    Ok(record)
}

/// Check that every transaction amount is a finite number
pub fn validate_statement(record: &StatementRecord) -> Result<(), String> {
    for (index, txn) in record.transactions.iter().enumerate() {
        if !txn.amount.is_finite() {
            return Err(format!(
                "Transaction {} ({}) has a non-finite amount",
                index + 1,
                txn.description
            ));
        }
    }
    Ok(())
}

/// Write a statement as JSON
pub fn write_statement_json<W: Write>(
    record: &StatementRecord,
    writer: &mut W,
    pretty: bool,
) -> VaultResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, record)
    } else {
        serde_json::to_writer(&mut *writer, record)
    };
    result.map_err(|e| VaultError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| VaultError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatementId, TransactionRecord, TransactionType};

    const SAMPLE: &str = r#"{
        "id": "s1",
        "bankName": "Bank A",
        "accountHolder": "J. Doe",
        "period": "01/2024",
        "transactions": [
            {"date": "01/01/2024", "amount": -50000, "description": "ATM", "type": "DEBIT"},
            {"date": "02/01/2024", "amount": 12.5, "description": "Refund", "type": "CREDIT",
             "partnerName": "Shop", "partnerAccount": "RO49"}
        ]
    }"#;

    #[test]
    fn test_read_statement_json() {
        let record = read_statement_json(SAMPLE).unwrap();

        assert_eq!(record.id, Some(StatementId::new("s1")));
        assert_eq!(record.bank_name, "Bank A");
        assert_eq!(record.file_name, "");
        assert!(record.saved_at.is_none());
        assert_eq!(record.transactions.len(), 2);
        assert_eq!(record.transactions[0].amount.value(), -50000.0);
        assert_eq!(record.transactions[1].transaction_type, TransactionType::Credit);
        assert_eq!(record.transactions[1].partner_account, "RO49");
    }

    #[test]
    fn test_read_invalid_json() {
        let err = read_statement_json("{not json").unwrap_err();
        assert!(matches!(err, VaultError::Import(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite_amounts() {
        let mut record = StatementRecord::new("Bank A");
        record.push(TransactionRecord::new("d", 1.0, "ok"));
        record.push(TransactionRecord::new("d", f64::NAN, "broken"));

        let err = validate_statement(&record).unwrap_err();
        assert!(err.contains("Transaction 2 (broken)"));
    }

    #[test]
    fn test_write_round_trips() {
        let record = read_statement_json(SAMPLE).unwrap();

        let mut output = Vec::new();
        write_statement_json(&record, &mut output, false).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("\"bankName\":\"Bank A\""));
        assert!(text.contains("\"type\":\"CREDIT\""));
        assert!(text.ends_with('\n'));
        assert_eq!(read_statement_json(&text).unwrap(), record);
    }
}
