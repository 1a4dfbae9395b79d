//! CSV Export functionality
//!
//! Exports a statement's transaction register to CSV.

use std::io::Write;

use crate::error::{VaultError, VaultResult};
use crate::models::StatementRecord;

/// Column header written before the first row
pub const CSV_HEADER: [&str; 8] = [
    "Date",
    "Amount",
    "Description",
    "Code",
    "Partner",
    "Partner Account",
    "Type",
    "Category",
];

/// Export every transaction of a statement to CSV
pub fn export_transactions_csv<W: Write>(record: &StatementRecord, writer: &mut W) -> VaultResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| VaultError::Export(e.to_string()))?;

    for txn in &record.transactions {
        let amount = format!("{:.2}", txn.amount.value());
        csv_writer
            .write_record([
                txn.date.as_str(),
                amount.as_str(),
                txn.description.as_str(),
                txn.transaction_code.as_str(),
                txn.partner_name.as_str(),
                txn.partner_account.as_str(),
                txn.transaction_type.as_token(),
                txn.category.as_str(),
            ])
            .map_err(|e| VaultError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| VaultError::Export(e.to_string()))?;

    Ok(())
}
