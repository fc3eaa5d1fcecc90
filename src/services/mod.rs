//! Service layer for the resilience tracker
//!
//! The service layer sits between user input and the financial state,
//! handling validation and listing order.

pub mod ledger;

pub use ledger::{
    sort_transactions, CreateTransactionInput, LedgerService, RecordedTransaction, SortKey,
    SortOrder, TransactionSort,
};
