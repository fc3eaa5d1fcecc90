//! Core data models for the resilience tracker
//!
//! This module contains the data structures that represent a user's financial
//! situation: income sources, transactions, and the aggregate state scored by
//! [`crate::scoring`].

pub mod category;
pub mod ids;
pub mod income_source;
pub mod money;
pub mod state;
pub mod transaction;

pub use category::{resolve_suggestion, suggested_categories, ExpenseCategory, EXPENSE_CATEGORIES};
pub use ids::TransactionId;
pub use income_source::{IncomeSource, IncomeSourceType};
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use state::FinancialState;
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
