//! Transaction model
//!
//! One line of bank account activity as it appears on a statement.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money coming into the account
    Credit,
    /// Money leaving the account
    #[default]
    Debit,
}

impl TransactionType {
    /// Wire token for credits
    pub const CREDIT_TOKEN: &'static str = "CREDIT";
    /// Wire token for debits
    pub const DEBIT_TOKEN: &'static str = "DEBIT";

    /// Map a stored token back to a type
    ///
    /// Only the exact `CREDIT` token is a credit; anything else, including
    /// lowercase spellings and empty text, is treated as a debit.
    pub fn from_token(token: &str) -> Self {
        if token == Self::CREDIT_TOKEN {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    /// The token written to backups
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Credit => Self::CREDIT_TOKEN,
            Self::Debit => Self::DEBIT_TOKEN,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A single statement transaction
///
/// The date is kept exactly as the bank printed it; its format belongs to
/// whoever produced the statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRecord {
    /// Transaction date, caller-defined format
    pub date: String,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Amount,

    /// Free-text description from the statement
    pub description: String,

    /// Bank reference or transaction code
    pub transaction_code: String,

    /// Counterparty name
    pub partner_name: String,

    /// Counterparty account number
    pub partner_account: String,

    /// Credit or debit
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Spending category
    pub category: String,
}

impl TransactionRecord {
    /// Create a transaction with the fields every statement row has
    pub fn new(date: impl Into<String>, amount: impl Into<Amount>, description: impl Into<String>) -> Self {
        let amount = amount.into();
        Self {
            date: date.into(),
            amount,
            description: description.into(),
            transaction_type: if amount.is_positive() {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            },
            ..Self::default()
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the counterparty name and account
    pub fn with_partner(mut self, name: impl Into<String>, account: impl Into<String>) -> Self {
        self.partner_name = name.into();
        self.partner_account = account.into();
        self
    }

    /// Set the transaction code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.transaction_code = code.into();
        self
    }

    /// Set the transaction type
    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Check if this is a credit
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }

    /// Check if this is a debit
    pub fn is_debit(&self) -> bool {
        self.transaction_type == TransactionType::Debit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_token() {
        assert_eq!(TransactionType::from_token("CREDIT"), TransactionType::Credit);
        assert_eq!(TransactionType::from_token("DEBIT"), TransactionType::Debit);
        assert_eq!(TransactionType::from_token("credit"), TransactionType::Debit);
        assert_eq!(TransactionType::from_token(""), TransactionType::Debit);
    }

    #[test]
    fn test_new_infers_type_from_sign() {
        let fee = TransactionRecord::new("01/01/2024", -50000.0, "ATM fee");
        assert!(fee.is_debit());

        let salary = TransactionRecord::new("02/01/2024", 1200.0, "Salary");
        assert!(salary.is_credit());
    }

    #[test]
    fn test_builder() {
        let txn = TransactionRecord::new("01/01/2024", -10.0, "Coffee")
            .with_category("Dining")
            .with_partner("Cafe", "123")
            .with_code("FT001")
            .with_type(TransactionType::Debit);

        assert_eq!(txn.category, "Dining");
        assert_eq!(txn.partner_name, "Cafe");
        assert_eq!(txn.partner_account, "123");
        assert_eq!(txn.transaction_code, "FT001");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let txn = TransactionRecord::new("01/01/2024", -5.0, "Fee").with_partner("Bank", "9");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["partnerName"], "Bank");
        assert_eq!(json["partnerAccount"], "9");
        assert_eq!(json["type"], "DEBIT");
    }

    #[test]
    fn test_deserialization_defaults_missing_fields() {
        let txn: TransactionRecord = serde_json::from_str(r#"{"date":"01/01/2024","amount":3}"#).unwrap();
        assert_eq!(txn.description, "");
        assert_eq!(txn.transaction_type, TransactionType::Debit);
        assert_eq!(txn.amount, Amount::new(3.0));
    }
}
