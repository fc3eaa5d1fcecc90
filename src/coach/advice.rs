//! Coaching advice
//!
//! Builds the coaching prompt from the aggregate figures and the current
//! score, and splits the free-form reply into bullets and paragraphs.

use std::str::Lines;

use tracing::debug;

use crate::error::ResilienceResult;
use crate::models::{FinancialState, Money};
use crate::scoring::ResilienceScore;

use super::backend::{GenerationRequest, GenerativeBackend};

/// Shown to the user whenever advice generation fails
pub const ADVICE_FAILURE_MESSAGE: &str = "Could not fetch advice. Please try again.";

/// Service that asks the generative backend for coaching tips
pub struct AdviceService<'a> {
    backend: &'a dyn GenerativeBackend,
}

impl<'a> AdviceService<'a> {
    pub fn new(backend: &'a dyn GenerativeBackend) -> Self {
        Self { backend }
    }

    /// Request 2-3 tips for the given state and its score
    ///
    /// Returns the raw reply text; use [`AdviceLines`] to present it.
    pub fn fetch_advice(
        &self,
        state: &FinancialState,
        score: &ResilienceScore,
    ) -> ResilienceResult<String> {
        let prompt = build_advice_prompt(state, score);
        debug!(weakest = %score.weakest_pillar(), "requesting advice");
        self.backend.generate(&GenerationRequest::text(prompt))
    }
}

fn zar(amount: Money) -> String {
    format!("ZAR {:.2}", amount.as_major_units())
}

/// The coaching prompt for a state and its score
pub fn build_advice_prompt(state: &FinancialState, score: &ResilienceScore) -> String {
    let sources = if state.income_sources.is_empty() {
        "None specified".to_string()
    } else {
        state.income_source_names().join(", ")
    };

    format!(
        "Act as a friendly, encouraging financial coach for a South African living in the informal economy.\n\
         Their financial situation is as follows:\n\
         - Income Sources: {sources}\n\
         - Total Monthly Income (Logged): {income}\n\
         - Total Monthly Expenses (Logged): {expenses}\n\
         - Monthly Debt Repayments: {debt}\n\
         - Total Savings: {savings}\n\
         \n\
         Their Financial Resilience Score is {overall}/100, with this breakdown:\n\
         - Income Stability: {stability}/100\n\
         - Debt Exposure: {exposure}/100\n\
         - Emergency Buffer: {buffer}/100\n\
         - Spending Behaviour: {spending}/100\n\
         \n\
         Based on this, provide 2-3 short, simple, and actionable tips to improve their financial resilience.\n\
         Focus on their weakest areas. For example, if Income Stability is low, suggest diversifying income. \
         If Emergency Buffer is low, suggest small savings habits.\n\
         Use plain, jargon-free language. Format the response as a simple markdown list.\n",
        sources = sources,
        income = zar(state.total_income()),
        expenses = zar(state.total_expenses()),
        debt = zar(state.monthly_debt),
        savings = zar(state.savings),
        overall = score.overall,
        stability = score.income_stability,
        exposure = score.debt_exposure,
        buffer = score.emergency_buffer,
        spending = score.spending_behaviour,
    )
}

/// One presentable line of advice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceLine<'a> {
    /// A list item, with its `* ` / `- ` marker removed
    Bullet(&'a str),
    Paragraph(&'a str),
}

impl<'a> AdviceLine<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Bullet(text) | Self::Paragraph(text) => text,
        }
    }
}

/// Lazy iterator over the non-blank lines of an advice reply
///
/// Cloning restarts from the same position, so the text can be walked more
/// than once without re-splitting.
#[derive(Debug, Clone)]
pub struct AdviceLines<'a> {
    lines: Lines<'a>,
}

impl<'a> AdviceLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }
}

impl<'a> Iterator for AdviceLines<'a> {
    type Item = AdviceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?.trim();
            if line.is_empty() {
                continue;
            }
            let item = match line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
                Some(rest) => AdviceLine::Bullet(rest.trim_start()),
                None => AdviceLine::Paragraph(line),
            };
            return Some(item);
        }
    }
}
