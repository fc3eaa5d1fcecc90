//! Ledger service
//!
//! The input boundary in front of [`FinancialState`]. Every user action that
//! changes the state goes through here so that invalid input is rejected
//! before it can reach the scoring model. A rejected action leaves the state
//! exactly as it was.

use tracing::debug;

use crate::error::{ResilienceError, ResilienceResult};
use crate::models::{
    resolve_suggestion, FinancialState, Money, Transaction, TransactionKind, MAX_AMOUNT,
};

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub is_recurring: bool,
}

/// A transaction that was accepted, plus how its category was matched
#[derive(Debug, Clone)]
pub struct RecordedTransaction {
    pub transaction: Transaction,
    /// False when the category is not one of the offered suggestions
    pub suggested_category: bool,
}

/// Service for validated mutations of a financial state
pub struct LedgerService<'a> {
    state: &'a mut FinancialState,
}

impl<'a> LedgerService<'a> {
    /// Create a ledger service over the given state
    pub fn new(state: &'a mut FinancialState) -> Self {
        Self { state }
    }

    /// Validate and append a transaction
    pub fn add_transaction(
        &mut self,
        input: CreateTransactionInput,
    ) -> ResilienceResult<RecordedTransaction> {
        let description = input.description.trim().to_string();
        let raw_category = input.category.trim();

        let canonical =
            resolve_suggestion(input.kind, &self.state.income_sources, raw_category);
        let suggested_category = canonical.is_some();
        let category = canonical.unwrap_or_else(|| raw_category.to_string());

        let txn = Transaction::new(input.kind, input.amount, description, category)
            .recurring(input.is_recurring);

        txn.validate().map_err(|e| {
            debug!(kind = %input.kind, "rejected transaction: {}", e);
            ResilienceError::Validation(e.to_string())
        })?;

        self.state.transactions.push(txn.clone());
        debug!(id = %txn.id, kind = %txn.kind, "recorded transaction");

        Ok(RecordedTransaction {
            transaction: txn,
            suggested_category,
        })
    }

    /// Replace the monthly debt repayment figure
    pub fn set_monthly_debt(&mut self, amount: Money) -> ResilienceResult<()> {
        require_positive("Monthly debt", amount)?;
        self.state.monthly_debt = amount;
        Ok(())
    }

    /// Replace the savings balance
    pub fn set_savings(&mut self, amount: Money) -> ResilienceResult<()> {
        require_positive("Savings", amount)?;
        self.state.savings = amount;
        Ok(())
    }

    /// Transactions in the requested order, as a new list
    pub fn sorted_transactions(&self, sort: TransactionSort) -> Vec<Transaction> {
        sort_transactions(&self.state.transactions, sort)
    }
}

fn require_positive(field: &str, amount: Money) -> ResilienceResult<()> {
    if !amount.is_positive() {
        debug!(field, %amount, "rejected non-positive amount");
        return Err(ResilienceError::Validation(format!(
            "{} must be greater than zero (got {})",
            field, amount
        )));
    }
    if !amount.is_within_limit() {
        debug!(field, %amount, "rejected oversized amount");
        return Err(ResilienceError::Validation(format!(
            "{} {} is larger than {}",
            field, amount, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Field transactions are sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }
}

/// Sort direction; newest / largest first by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" => Some(Self::Desc),
            "asc" | "ascending" => Some(Self::Asc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Desc => Self::Asc,
            Self::Asc => Self::Desc,
        }
    }
}

/// How to order a transaction listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl TransactionSort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// Stable sort: equal keys keep their insertion order in both directions
pub fn sort_transactions(transactions: &[Transaction], sort: TransactionSort) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| {
        let ascending = match sort.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
        };
        match sort.order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    });
    sorted
}
