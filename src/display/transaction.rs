//! Transaction display formatting
//!
//! Register view of logged transactions. Callers pass the list already in
//! the order they want shown.

use crate::models::Transaction;

use super::DisplayOptions;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, options: &DisplayOptions) -> String {
    let recurring_indicator = if txn.is_recurring { "↻" } else { " " };
    let amount = format!(
        "{}{}",
        txn.kind.sign(),
        txn.amount.format_with_symbol(&options.currency_symbol)
    );

    format!(
        "{} {:10} {:24} {:16} {:>12}",
        recurring_indicator,
        txn.date.format(&options.date_format),
        truncate(&txn.description, 24),
        truncate(&txn.category, 16),
        amount
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], options: &DisplayOptions) -> String {
    if transactions.is_empty() {
        return "No transactions logged yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:10} {:24} {:16} {:>12}\n",
        "", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(67));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, options));
        output.push('\n');
    }

    output
}

/// Truncate a string to a maximum display width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
