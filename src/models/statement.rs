//! Statement model
//!
//! A statement is the header information for one imported bank statement
//! plus its ordered list of transactions.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::StatementId;
use super::transaction::TransactionRecord;

/// One saved bank statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementRecord {
    /// Identifier; minted at encode time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StatementId>,

    /// Name of the file the statement was imported from
    pub file_name: String,

    /// Issuing bank
    pub bank_name: String,

    /// Account holder as printed on the statement
    pub account_holder: String,

    /// Statement period, free text
    pub period: String,

    /// Unix timestamp (milliseconds) of the save; sampled at encode time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<i64>,

    /// Transactions in statement order
    pub transactions: Vec<TransactionRecord>,
}

impl StatementRecord {
    /// Create an empty statement for a bank
    pub fn new(bank_name: impl Into<String>) -> Self {
        Self {
            bank_name: bank_name.into(),
            ..Self::default()
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<StatementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a transaction
    pub fn push(&mut self, transaction: TransactionRecord) {
        self.transactions.push(transaction);
    }

    /// Number of transactions
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sum of all credits
    pub fn total_credits(&self) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.is_credit())
            .map(|t| t.amount.abs())
            .sum()
    }

    /// Sum of all debits
    pub fn total_debits(&self) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount.abs())
            .sum()
    }

    /// Net movement over the statement
    pub fn net(&self) -> Amount {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}
