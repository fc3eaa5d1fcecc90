//! Financial state
//!
//! The aggregate root fed to the scoring model: declared income sources, the
//! logged transactions in insertion order, and the two user-set scalars.
//! Totals are derived on every read, never stored.

use serde::{Deserialize, Serialize};

use super::income_source::IncomeSource;
use super::money::Money;
use super::transaction::{Transaction, TransactionKind};

/// Everything the user has told us about their finances this session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinancialState {
    /// Income channels declared at onboarding
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,

    /// Logged transactions, in the order they were recorded
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Total recurring monthly debt repayment (overwritten, not accumulated)
    #[serde(default)]
    pub monthly_debt: Money,

    /// Current savings balance (overwritten, not accumulated; may be negative)
    #[serde(default)]
    pub savings: Money,
}

impl FinancialState {
    /// Empty state right after onboarding with the chosen sources
    pub fn onboarded(income_sources: Vec<IncomeSource>) -> Self {
        Self {
            income_sources,
            ..Self::default()
        }
    }

    /// Sum of all income transactions
    pub fn total_income(&self) -> Money {
        self.total_for(TransactionKind::Income)
    }

    /// Sum of all expense transactions
    pub fn total_expenses(&self) -> Money {
        self.total_for(TransactionKind::Expense)
    }

    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    fn total_for(&self, kind: TransactionKind) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Display names of the declared income sources
    pub fn income_source_names(&self) -> Vec<&str> {
        self.income_sources.iter().map(|s| s.name.as_str()).collect()
    }
}
