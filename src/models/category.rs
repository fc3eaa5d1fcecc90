//! Suggested transaction categories
//!
//! Category labels on transactions are free text. The suggestions below are
//! offered at the input boundary; anything else is accepted but flagged.

use super::income_source::IncomeSource;
use super::transaction::TransactionKind;

/// A suggested expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseCategory {
    /// Short identifier
    pub id: &'static str,
    /// Label stored on the transaction
    pub name: &'static str,
}

/// Expense categories offered by default
pub const EXPENSE_CATEGORIES: &[ExpenseCategory] = &[
    ExpenseCategory {
        id: "groceries",
        name: "Groceries",
    },
    ExpenseCategory {
        id: "transport",
        name: "Transport",
    },
    ExpenseCategory {
        id: "rent",
        name: "Rent/Housing",
    },
    ExpenseCategory {
        id: "airtime",
        name: "Airtime/Data",
    },
];

/// Category labels suggested for a transaction of the given kind
///
/// Income is categorized by the user's own declared income sources.
pub fn suggested_categories(kind: TransactionKind, income_sources: &[IncomeSource]) -> Vec<String> {
    match kind {
        TransactionKind::Income => income_sources.iter().map(|s| s.name.clone()).collect(),
        TransactionKind::Expense => EXPENSE_CATEGORIES
            .iter()
            .map(|c| c.name.to_string())
            .collect(),
    }
}

/// Resolve user input to a suggested label, if it matches one
///
/// Matches the label or the expense id, case-insensitively, and returns the
/// canonical spelling.
pub fn resolve_suggestion(
    kind: TransactionKind,
    income_sources: &[IncomeSource],
    input: &str,
) -> Option<String> {
    let needle = input.trim();
    if kind == TransactionKind::Expense {
        if let Some(category) = EXPENSE_CATEGORIES
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(needle))
        {
            return Some(category.name.to_string());
        }
    }

    suggested_categories(kind, income_sources)
        .into_iter()
        .find(|label| label.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeSourceType;

    #[test]
    fn test_expense_suggestions() {
        let labels = suggested_categories(TransactionKind::Expense, &[]);
        assert_eq!(
            labels,
            vec!["Groceries", "Transport", "Rent/Housing", "Airtime/Data"]
        );
    }

    #[test]
    fn test_income_suggestions_follow_declared_sources() {
        let sources = vec![
            IncomeSource::new(IncomeSourceType::FormalJob),
            IncomeSource::new(IncomeSourceType::SocialGrant),
        ];
        let labels = suggested_categories(TransactionKind::Income, &sources);
        assert_eq!(labels, vec!["Formal Job", "Social Grant"]);
    }

    #[test]
    fn test_resolve_suggestion() {
        assert_eq!(
            resolve_suggestion(TransactionKind::Expense, &[], "rent"),
            Some("Rent/Housing".to_string())
        );
        assert_eq!(
            resolve_suggestion(TransactionKind::Expense, &[], "groceries"),
            Some("Groceries".to_string())
        );
        assert_eq!(
            resolve_suggestion(TransactionKind::Expense, &[], "Stokvel"),
            None
        );

        let sources = vec![IncomeSource::new(IncomeSourceType::SideHustle)];
        assert_eq!(
            resolve_suggestion(TransactionKind::Income, &sources, "side hustle"),
            Some("Side Hustle".to_string())
        );
        assert_eq!(
            resolve_suggestion(TransactionKind::Income, &sources, "rent"),
            None
        );
    }
}
