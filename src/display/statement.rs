//! Statement display formatting
//!
//! Provides utilities for formatting statements for terminal display,
//! including a header summary and a register view of transactions.

use crate::models::{StatementRecord, TransactionRecord};

const REGISTER_WIDTH: usize = 64;

/// Format the statement header and totals
pub fn format_statement_summary(statement: &StatementRecord) -> String {
    let mut output = String::new();

    let id = statement
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(none)".to_string());

    output.push_str(&format!("Statement:   {}\n", id));
    output.push_str(&format!("Bank:        {}\n", or_placeholder(&statement.bank_name)));

    if !statement.account_holder.is_empty() {
        output.push_str(&format!("Holder:      {}\n", statement.account_holder));
    }
    if !statement.period.is_empty() {
        output.push_str(&format!("Period:      {}\n", statement.period));
    }
    if !statement.file_name.is_empty() {
        output.push_str(&format!("File:        {}\n", statement.file_name));
    }
    if let Some(saved_at) = statement.saved_at {
        let saved = chrono::DateTime::from_timestamp_millis(saved_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| saved_at.to_string());
        output.push_str(&format!("Saved:       {}\n", saved));
    }

    output.push_str(&format!("Transactions: {}\n", statement.transaction_count()));
    output.push_str(&format!("Credits:     {:.2}\n", statement.total_credits().value()));
    output.push_str(&format!("Debits:      {:.2}\n", statement.total_debits().value()));
    output.push_str(&format!("Net:         {:.2}\n", statement.net().value()));

    output
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &TransactionRecord) -> String {
    let description = if txn.description.is_empty() {
        "(no description)"
    } else {
        &txn.description
    };

    let mut row = format!(
        "{:6} {} {} {:>12.2}",
        txn.transaction_type.as_token(),
        truncate(&txn.date, 10),
        truncate(description, 28),
        txn.amount.value()
    );

    if !txn.category.is_empty() {
        row.push_str(&format!("  [{}]", txn.category));
    }

    row
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[TransactionRecord]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:6} {:10} {:28} {:>12}\n",
        "Type", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(REGISTER_WIDTH));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

fn or_placeholder(s: &str) -> &str {
    if s.is_empty() {
        "(unknown)"
    } else {
        s
    }
}

/// Pad or cut a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatementRecord {
        let mut statement = StatementRecord::new("Bank A").with_id("s1");
        statement.period = "01/2024".into();
        statement.saved_at = Some(0);
        statement.push(TransactionRecord::new("01/01/2024", -50000.0, "Rent").with_category("Housing"));
        statement.push(TransactionRecord::new("02/01/2024", 1200.0, "Salary"));
        statement
    }

    #[test]
    fn test_summary() {
        let summary = format_statement_summary(&sample());

        assert!(summary.contains("Statement:   s1"));
        assert!(summary.contains("Period:      01/2024"));
        assert!(summary.contains("Saved:       1970-01-01 00:00:00 UTC"));
        assert!(summary.contains("Transactions: 2"));
        assert!(summary.contains("Net:         -48800.00"));
        assert!(!summary.contains("Holder:"));
    }

    #[test]
    fn test_register() {
        let register = format_transaction_register(&sample().transactions);
        let lines: Vec<&str> = register.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Type"));
        assert!(lines[2].starts_with("DEBIT  01/01/2024 Rent"));
        assert!(lines[2].ends_with("-50000.00  [Housing]"));
        assert!(lines[3].ends_with("1200.00"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Café Bistro Downtown", 10), "Café Bi...");
        assert_eq!(truncate("ab", 4), "ab  ");
    }
}
