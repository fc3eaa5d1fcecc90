//! Resilience score value type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::FinancialState;

use super::calculator::ResilienceScoreCalculator;

/// Output of the scoring model
///
/// Derived, never stored: recompute it whenever the state changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResilienceScore {
    /// Unweighted mean of the four sub-scores
    pub overall: f64,
    pub income_stability: f64,
    pub debt_exposure: f64,
    /// Capped at 100 but may be negative when savings are negative
    pub emergency_buffer: f64,
    pub spending_behaviour: f64,
}

impl ResilienceScore {
    /// Score the given state
    pub fn for_state(state: &FinancialState) -> Self {
        ResilienceScoreCalculator::compute_state(state)
    }

    /// The four sub-scores, in presentation order
    pub fn pillars(&self) -> [(Pillar, f64); 4] {
        [
            (Pillar::IncomeStability, self.income_stability),
            (Pillar::DebtExposure, self.debt_exposure),
            (Pillar::EmergencyBuffer, self.emergency_buffer),
            (Pillar::SpendingBehaviour, self.spending_behaviour),
        ]
    }

    /// Lowest sub-score; the first one wins ties
    pub fn weakest_pillar(&self) -> Pillar {
        let mut pillars = self.pillars().into_iter();
        let mut weakest = pillars
            .next()
            .unwrap_or((Pillar::IncomeStability, self.income_stability));
        for candidate in pillars {
            if candidate.1 < weakest.1 {
                weakest = candidate;
            }
        }
        weakest.0
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.overall)
    }
}

/// One of the four sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    IncomeStability,
    DebtExposure,
    EmergencyBuffer,
    SpendingBehaviour,
}

impl Pillar {
    pub fn label(&self) -> &'static str {
        match self {
            Self::IncomeStability => "Income Stability",
            Self::DebtExposure => "Debt Exposure",
            Self::EmergencyBuffer => "Emergency Buffer",
            Self::SpendingBehaviour => "Spending Habits",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative band of a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Weak,
    Fair,
    Strong,
}

impl ScoreBand {
    /// Strong above 75, fair above 40, weak otherwise
    pub fn of(value: f64) -> Self {
        if value > 75.0 {
            Self::Strong
        } else if value > 40.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "Weak"),
            Self::Fair => write!(f, "Fair"),
            Self::Strong => write!(f, "Strong"),
        }
    }
}
