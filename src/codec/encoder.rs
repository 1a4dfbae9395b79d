//! Backup encoder
//!
//! Document layout:
//!
//! 1. the static table declarations ([`PREAMBLE`])
//! 2. one statement insert with a single tuple
//! 3. when there are transactions, one transaction insert with a tuple per
//!    transaction, separated by [`ROW_SEPARATOR`]
//!
//! Rows are produced one at a time and either appended to a `String` or
//! written straight to an `io::Write`, so statement size is bounded only by
//! memory (or not at all when streaming).

use std::io::Write;

use chrono::Utc;

use crate::error::{VaultError, VaultResult};
use crate::models::{StatementId, StatementRecord, TransactionRecord};

use super::literal::{escape_literal, number_literal};
use super::schema::{
    column_list, PREAMBLE, ROW_SEPARATOR, STATEMENTS_TABLE, STATEMENT_COLUMNS, TERMINATOR,
    TRANSACTIONS_TABLE, TRANSACTION_COLUMNS,
};

/// What a streamed encode produced
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSummary {
    /// Statement id written to the backup
    pub statement_id: StatementId,
    /// savedAt written to the backup
    pub saved_at: i64,
    /// Number of transaction rows written
    pub rows_written: usize,
}

/// Encoder for one statement
///
/// Missing id and savedAt are resolved once, when the encoder is created, so
/// every row of the document repeats the same id.
#[derive(Debug)]
pub struct Encoder<'a> {
    record: &'a StatementRecord,
    statement_id: StatementId,
    saved_at: i64,
}

impl<'a> Encoder<'a> {
    /// Prepare to encode `record`
    pub fn new(record: &'a StatementRecord) -> Self {
        let statement_id = match &record.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => StatementId::generate(),
        };
        let saved_at = record
            .saved_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        Self {
            record,
            statement_id,
            saved_at,
        }
    }

    /// Id written to every row
    pub fn statement_id(&self) -> &StatementId {
        &self.statement_id
    }

    /// savedAt written to the header row
    pub fn saved_at(&self) -> i64 {
        self.saved_at
    }

    /// Static table declarations
    pub fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    /// The statement insert, terminator included
    pub fn metadata_statement(&self) -> String {
        let record = self.record;
        format!(
            "INSERT INTO {} ({}) VALUES ({}, {}, {}, {}, {}, {}){}\n",
            STATEMENTS_TABLE,
            column_list(&STATEMENT_COLUMNS),
            escape_literal(Some(self.statement_id.as_str())),
            escape_literal(Some(&record.file_name)),
            escape_literal(Some(&record.bank_name)),
            escape_literal(Some(&record.account_holder)),
            escape_literal(Some(&record.period)),
            self.saved_at,
            TERMINATOR,
        )
    }

    /// Header of the transaction insert, up to and including `VALUES`
    pub fn transactions_header(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES\n",
            TRANSACTIONS_TABLE,
            column_list(&TRANSACTION_COLUMNS)
        )
    }

    /// One transaction tuple, without separator
    pub fn transaction_row(&self, txn: &TransactionRecord) -> String {
        format!(
            "({}, {}, {}, {}, {}, {}, {}, {}, {})",
            escape_literal(Some(self.statement_id.as_str())),
            escape_literal(Some(&txn.date)),
            number_literal(txn.amount.value()),
            escape_literal(Some(&txn.description)),
            escape_literal(Some(&txn.transaction_code)),
            escape_literal(Some(&txn.partner_name)),
            escape_literal(Some(&txn.partner_account)),
            escape_literal(Some(txn.transaction_type.as_token())),
            escape_literal(Some(&txn.category)),
        )
    }

    /// Encode the whole document into a string
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(
            PREAMBLE.len() + 256 + self.record.transactions.len() * 160,
        );
        out.push_str(self.preamble());
        out.push('\n');
        out.push_str(&self.metadata_statement());

        if !self.record.transactions.is_empty() {
            out.push('\n');
            out.push_str(&self.transactions_header());
            for (i, txn) in self.record.transactions.iter().enumerate() {
                if i > 0 {
                    out.push_str(ROW_SEPARATOR);
                }
                out.push_str(&self.transaction_row(txn));
            }
            out.push(TERMINATOR);
            out.push('\n');
        }

        out
    }

    /// Stream the whole document to a writer
    ///
    /// Produces exactly the same bytes as [`Encoder::encode`].
    pub fn write_to<W: Write>(&self, writer: &mut W) -> VaultResult<EncodeSummary> {
        let io_err = |e: std::io::Error| VaultError::Export(format!("Failed to write backup: {}", e));

        writer.write_all(self.preamble().as_bytes()).map_err(io_err)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer
            .write_all(self.metadata_statement().as_bytes())
            .map_err(io_err)?;

        let mut rows_written = 0;
        if !self.record.transactions.is_empty() {
            writer.write_all(b"\n").map_err(io_err)?;
            writer
                .write_all(self.transactions_header().as_bytes())
                .map_err(io_err)?;
            for txn in &self.record.transactions {
                if rows_written > 0 {
                    writer.write_all(ROW_SEPARATOR.as_bytes()).map_err(io_err)?;
                }
                writer
                    .write_all(self.transaction_row(txn).as_bytes())
                    .map_err(io_err)?;
                rows_written += 1;
            }
            writer.write_all(b";\n").map_err(io_err)?;
        }

        writer.flush().map_err(io_err)?;

        Ok(EncodeSummary {
            statement_id: self.statement_id.clone(),
            saved_at: self.saved_at,
            rows_written,
        })
    }
}

/// Encode a statement into backup text
pub fn encode(record: &StatementRecord) -> String {
    Encoder::new(record).encode()
}

/// Stream a statement as backup text to a writer
pub fn write_backup<W: Write>(record: &StatementRecord, writer: &mut W) -> VaultResult<EncodeSummary> {
    Encoder::new(record).write_to(writer)
}
