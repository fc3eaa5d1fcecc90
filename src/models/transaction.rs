//! Transaction model
//!
//! A single logged money movement. Transactions are created by user action,
//! never edited and never deleted during a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::{Money, MAX_AMOUNT};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Sign shown next to amounts in listings
    pub fn sign(&self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A logged transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Free-text description
    pub description: String,

    /// Amount, always positive; direction comes from `kind`
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Creation time, also the default sort key
    pub date: DateTime<Utc>,

    /// Category label (free text)
    pub category: String,

    /// Whether the user flagged this as recurring
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    /// Create a new transaction stamped with the current time
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            description: description.into(),
            amount,
            kind,
            date: Utc::now(),
            category: category.into(),
            is_recurring: false,
        }
    }

    /// Builder-style recurring flag
    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::BlankDescription);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::BlankCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.kind.sign(),
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    BlankDescription,
    BlankCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is larger than {}", amount, MAX_AMOUNT)
            }
            Self::BlankDescription => write!(f, "Description is required"),
            Self::BlankCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            TransactionKind::Expense,
            Money::from_cents(5000),
            "Taxi to town",
            "Transport",
        );
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert!(!txn.is_recurring);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let zero = Transaction::new(TransactionKind::Income, Money::zero(), "Pay", "Formal Job");
        assert_eq!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );

        let blank = Transaction::new(TransactionKind::Income, Money::from_cents(100), "  ", "x");
        assert_eq!(
            blank.validate(),
            Err(TransactionValidationError::BlankDescription)
        );

        let no_cat = Transaction::new(TransactionKind::Income, Money::from_cents(100), "Pay", "");
        assert_eq!(no_cat.validate(), Err(TransactionValidationError::BlankCategory));

        let at_cap = Transaction::new(TransactionKind::Income, MAX_AMOUNT, "Lotto", "Windfall");
        assert!(at_cap.validate().is_ok());

        let huge = Money::from_cents(5_000_000_000_000_000_000);
        let over = Transaction::new(TransactionKind::Income, huge, "Lotto", "Windfall");
        assert_eq!(
            over.validate(),
            Err(TransactionValidationError::AmountTooLarge(huge))
        );
    }

    #[test]
    fn test_serialization_uses_type_tag() {
        let txn = Transaction::new(
            TransactionKind::Income,
            Money::from_cents(35000),
            "SASSA",
            "Social Grant",
        )
        .recurring(true);

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["amount"], 35000);
        assert_eq!(json["is_recurring"], true);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_recurring_defaults_to_false() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Bread",
            "amount": 2000,
            "type": "expense",
            "date": "2025-03-01T10:00:00Z",
            "category": "Groceries"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(!txn.is_recurring);
        assert_eq!(txn.to_string(), "2025-03-01 Bread - R20.00");
    }
}
