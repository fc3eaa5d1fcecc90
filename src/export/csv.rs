//! CSV Export functionality
//!
//! Exports logged transactions in spreadsheet-friendly form.

use crate::error::ResilienceResult;
use crate::models::{FinancialState, Transaction};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransactionRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Recurring")]
    is_recurring: bool,
}

impl<'a> From<&'a Transaction> for TransactionRecord<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.to_rfc3339(),
            kind: txn.kind.to_string(),
            description: &txn.description,
            category: &txn.category,
            amount: format!("{:.2}", txn.amount.as_major_units()),
            is_recurring: txn.is_recurring,
        }
    }
}

/// Export all transactions to CSV, in the order they were logged
pub fn export_transactions_csv<W: Write>(state: &FinancialState, writer: W) -> ResilienceResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if state.transactions.is_empty() {
        csv_writer.write_record([
            "ID",
            "Date",
            "Type",
            "Description",
            "Category",
            "Amount",
            "Recurring",
        ])?;
    }

    for txn in &state.transactions {
        csv_writer.serialize(TransactionRecord::from(txn))?;
    }

    csv_writer.flush()?;
    Ok(())
}
