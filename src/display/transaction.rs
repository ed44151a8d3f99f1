//! Transaction display formatting
//!
//! Register-style terminal output for the transaction log.

use crate::models::{Transaction, TransactionKind};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let direction = match txn.kind {
        TransactionKind::Give => "→",
        TransactionKind::Receive => "←",
    };

    // The balance effect carries the sign: gifts given count for the user.
    let signed = match txn.kind {
        TransactionKind::Give => txn.amount,
        TransactionKind::Receive => -txn.amount,
    };

    let occasion = if txn.occasion.is_empty() {
        String::new()
    } else {
        format!("  ({})", txn.occasion)
    };

    format!(
        "{} {} {} {:20} {:>12}{}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        direction,
        truncate(&txn.person_name, 20),
        signed.format_with_symbol(symbol),
        occasion
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {} {:20} {:>12}\n",
        "ID", "Date", " ", "Person", "Amount"
    ));
    output.push_str(&"-".repeat(62));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Person:      {}\n", txn.person_name));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));

    if !txn.occasion.is_empty() {
        output.push_str(&format!("Occasion:    {}\n", txn.occasion));
    }
    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }
    if !txn.tags.is_empty() {
        output.push_str(&format!("Tags:        {}\n", txn.tags.join(", ")));
    }

    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Truncate a string for fixed-width display
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
