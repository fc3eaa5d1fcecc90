//! Rand amounts
//!
//! Amounts are held as integer cents so that summing many logged
//! transactions never drifts. The scoring model works in floating-point major
//! units; [`Money::as_major_units`] is the single conversion point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Default currency symbol (South African rand)
pub const DEFAULT_SYMBOL: &str = "R";

/// Largest amount accepted for a single figure (R1 000 000 000.00)
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// An amount of money in cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Wrap a cent count
    ///
    /// # Examples
    /// ```
    /// use resilience_cli::models::Money;
    /// let taxi_fare = Money::from_cents(1850);
    /// assert_eq!(taxi_fare.to_string(), "R18.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Magnitude no larger than [`MAX_AMOUNT`]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= MAX_AMOUNT.0.unsigned_abs()
    }

    /// Amount in major currency units, as consumed by the scoring model
    pub fn as_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse user-typed amounts
    ///
    /// Accepts "530", "530.5", "530.50", an optional rand symbol ("R530",
    /// "R 530") and a leading minus. Digits past the second decimal place are
    /// dropped. Amounts beyond [`MAX_AMOUNT`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let typed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(typed.to_string());

        let (negative, rest) = match typed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, typed),
        };
        let rest = rest
            .strip_prefix(DEFAULT_SYMBOL)
            .or_else(|| rest.strip_prefix('r'))
            .unwrap_or(rest)
            .trim_start();

        let (whole, fraction) = rest.split_once('.').unwrap_or((rest, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let rands: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.get(..2) {
            Some(two) => two.parse().map_err(|_| invalid())?,
            None if fraction.is_empty() => 0,
            None => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        };

        let total = rands
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        let amount = Self(if negative { -total } else { total });
        if !amount.is_within_limit() {
            return Err(MoneyParseError::OutOfRange(typed.to_string()));
        }
        Ok(amount)
    }

    /// Render with the given symbol, sign in front of it: `-R5.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, magnitude / 100, magnitude % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Failure to read an amount typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "'{}' is not an amount", s),
            Self::OutOfRange(s) => write!(f, "'{}' is larger than {}", s, MAX_AMOUNT),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_formatting() {
        assert_eq!(Money::from_cents(53000).to_string(), "R530.00");
        assert_eq!(Money::zero().to_string(), "R0.00");
        assert_eq!(Money::from_cents(-70000).to_string(), "-R700.00");
        assert_eq!(Money::from_cents(7).to_string(), "R0.07");
        assert_eq!(Money::from_cents(-5).format_with_symbol("ZAR "), "-ZAR 0.05");
    }

    #[test]
    fn test_parse_typed_amounts() {
        let cents = |s: &str| Money::parse(s).unwrap().cents();
        assert_eq!(cents("530"), 53000);
        assert_eq!(cents("530.5"), 53050);
        assert_eq!(cents("R45.50"), 4550);
        assert_eq!(cents("R 45.50"), 4550);
        assert_eq!(cents("r12"), 1200);
        assert_eq!(cents("-700"), -70000);
        assert_eq!(cents(".75"), 75);
        assert_eq!(cents("12.999"), 1299);
    }

    #[test]
    fn test_parse_rejects_non_amounts() {
        for typed in ["", "R", "airtime", "1.2.3", "10.-5", "1,000", "99999999999999999999"] {
            assert!(Money::parse(typed).is_err(), "accepted {:?}", typed);
        }
        assert_eq!(
            Money::parse(" lots ").unwrap_err().to_string(),
            "'lots' is not an amount"
        );
    }

    #[test]
    fn test_parse_caps_amounts() {
        assert_eq!(Money::parse("1000000000").unwrap(), MAX_AMOUNT);
        assert_eq!(Money::parse("-1000000000").unwrap().cents(), -100_000_000_000);
        assert_eq!(
            Money::parse("50000000000000000"),
            Err(MoneyParseError::OutOfRange("50000000000000000".into()))
        );
        assert_eq!(
            Money::parse("1000000000.01").unwrap_err().to_string(),
            "'1000000000.01' is larger than R1000000000.00"
        );
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 10);
        let total: Money = [huge, huge, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert!(!total.is_within_limit());

        let floor = Money::from_cents(i64::MIN + 1) - Money::from_cents(100);
        assert_eq!(floor.cents(), i64::MIN);
    }

    #[test]
    fn test_major_units() {
        assert_eq!(Money::from_cents(500000).as_major_units(), 5000.0);
        assert_eq!(Money::from_cents(-50000).as_major_units(), -500.0);
        assert_eq!(Money::from_cents(1).as_major_units(), 0.01);
    }

    #[test]
    fn test_totals() {
        let spend = [1850, 4550, 12000].map(Money::from_cents);
        let total: Money = spend.into_iter().sum();
        assert_eq!(total.cents(), 18400);
        assert_eq!((total - Money::from_cents(400)).cents(), 18000);
    }

    #[test]
    fn test_serialized_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(4550)).unwrap();
        assert_eq!(json, "4550");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap().cents(), 4550);
    }
}
