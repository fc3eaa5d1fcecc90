//! Resilience score calculator
//!
//! Pure, total mapping from a financial situation to four sub-scores and their
//! unweighted mean. No I/O, no state, no error conditions: every finite input
//! (including zero income and negative savings) yields a finite score.
//!
//! Three sub-scores live in [0, 100]. The emergency buffer is only capped from
//! above, so negative savings produce a negative buffer score which then pulls
//! the overall score down with it.

use crate::models::FinancialState;

use super::score::ResilienceScore;

/// Points awarded per declared income source
pub const POINTS_PER_INCOME_SOURCE: f64 = 25.0;

/// Flat bonus once any income has actually been logged
pub const LOGGED_INCOME_BONUS: f64 = 20.0;

/// Debt-to-income percentage points are penalized at this rate
pub const DEBT_PENALTY_MULTIPLIER: f64 = 1.5;

/// Share of income assumed to be spent when no expenses are logged
pub const ASSUMED_EXPENSE_SHARE: f64 = 0.7;

/// Monthly expense assumption when neither income nor expenses are known
pub const FALLBACK_MONTHLY_EXPENSES: f64 = 2000.0;

/// Days per month used to turn monthly expenses into a daily burn
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Days of savings coverage needed for a full emergency-buffer score
pub const FULL_BUFFER_DAYS: f64 = 30.0;

/// Spending score when income exactly matches expenses
pub const NEUTRAL_SPENDING_SCORE: f64 = 50.0;

const MAX_SCORE: f64 = 100.0;

/// The five scalar inputs of the scoring model
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ScoreInputs {
    pub income_source_count: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub monthly_debt: f64,
    pub savings: f64,
}

impl ScoreInputs {
    /// Derive the inputs from a financial state (totals in major units)
    pub fn from_state(state: &FinancialState) -> Self {
        Self {
            income_source_count: state.income_sources.len(),
            total_income: state.total_income().as_major_units(),
            total_expenses: state.total_expenses().as_major_units(),
            monthly_debt: state.monthly_debt.as_major_units(),
            savings: state.savings.as_major_units(),
        }
    }
}

/// Computes [`ResilienceScore`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ResilienceScoreCalculator;

impl ResilienceScoreCalculator {
    /// Score a financial situation
    pub fn compute(
        income_source_count: usize,
        total_income: f64,
        total_expenses: f64,
        monthly_debt: f64,
        savings: f64,
    ) -> ResilienceScore {
        let income_stability = Self::income_stability(income_source_count, total_income);
        let debt_exposure = Self::debt_exposure(monthly_debt, total_income);
        let emergency_buffer = Self::emergency_buffer(savings, total_income, total_expenses);
        let spending_behaviour = Self::spending_behaviour(total_income, total_expenses);

        let overall =
            (income_stability + debt_exposure + emergency_buffer + spending_behaviour) / 4.0;

        ResilienceScore {
            overall,
            income_stability,
            debt_exposure,
            emergency_buffer,
            spending_behaviour,
        }
    }

    /// Score a bundle of inputs
    pub fn compute_inputs(inputs: &ScoreInputs) -> ResilienceScore {
        Self::compute(
            inputs.income_source_count,
            inputs.total_income,
            inputs.total_expenses,
            inputs.monthly_debt,
            inputs.savings,
        )
    }

    /// Score the current financial state
    pub fn compute_state(state: &FinancialState) -> ResilienceScore {
        Self::compute_inputs(&ScoreInputs::from_state(state))
    }

    /// 25 points per declared source, +20 once income is logged, capped at 100
    pub fn income_stability(income_source_count: usize, total_income: f64) -> f64 {
        let bonus = if total_income > 0.0 {
            LOGGED_INCOME_BONUS
        } else {
            0.0
        };
        (income_source_count as f64 * POINTS_PER_INCOME_SOURCE + bonus).min(MAX_SCORE)
    }

    /// Monthly debt as a percentage of income
    ///
    /// Without income, any debt counts as 100% and no debt as 0%.
    pub fn debt_to_income_ratio(monthly_debt: f64, total_income: f64) -> f64 {
        if total_income > 0.0 {
            (monthly_debt / total_income) * 100.0
        } else if monthly_debt > 0.0 {
            100.0
        } else {
            0.0
        }
    }

    /// 100 minus 1.5x the debt-to-income percentage, floored at 0
    pub fn debt_exposure(monthly_debt: f64, total_income: f64) -> f64 {
        let ratio = Self::debt_to_income_ratio(monthly_debt, total_income);
        (MAX_SCORE - ratio * DEBT_PENALTY_MULTIPLIER).max(0.0)
    }

    /// Logged expenses, else 70% of income, else the fixed fallback
    pub fn estimated_monthly_expenses(total_income: f64, total_expenses: f64) -> f64 {
        if total_expenses > 0.0 {
            return total_expenses;
        }

        let from_income = total_income * ASSUMED_EXPENSE_SHARE;
        if from_income > 0.0 {
            from_income
        } else {
            FALLBACK_MONTHLY_EXPENSES
        }
    }

    /// How many days current savings cover at the estimated daily spend
    pub fn days_of_buffer(savings: f64, estimated_monthly_expenses: f64) -> f64 {
        if estimated_monthly_expenses > 0.0 {
            savings / (estimated_monthly_expenses / DAYS_PER_MONTH)
        } else {
            0.0
        }
    }

    /// Percentage of a 30-day buffer, capped at 100 but not floored
    ///
    /// A shortfall too deep to represent (huge negative savings against a
    /// near-zero expense estimate) bottoms out at `f64::MIN` instead of
    /// negative infinity, so the overall score stays finite.
    pub fn emergency_buffer(savings: f64, total_income: f64, total_expenses: f64) -> f64 {
        let estimated = Self::estimated_monthly_expenses(total_income, total_expenses);
        let days = Self::days_of_buffer(savings, estimated);
        ((days / FULL_BUFFER_DAYS) * 100.0).min(MAX_SCORE).max(f64::MIN)
    }

    /// Net income as a percentage of income (0 when there is no income)
    pub fn savings_rate(total_income: f64, total_expenses: f64) -> f64 {
        let monthly_net = total_income - total_expenses;
        if total_income > 0.0 {
            (monthly_net / total_income) * 100.0
        } else {
            0.0
        }
    }

    /// 50 plus the savings rate, clamped to [0, 100]
    pub fn spending_behaviour(total_income: f64, total_expenses: f64) -> f64 {
        let rate = Self::savings_rate(total_income, total_expenses);
        if rate < 0.0 {
            (NEUTRAL_SPENDING_SCORE + rate).max(0.0)
        } else {
            (NEUTRAL_SPENDING_SCORE + rate).min(MAX_SCORE)
        }
    }
}
