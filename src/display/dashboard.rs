//! Dashboard view
//!
//! Totals, the score card, and the transaction register in one block.

use crate::models::{FinancialState, Money};
use crate::scoring::ResilienceScore;
use crate::services::{sort_transactions, TransactionSort};

use super::score::format_score_card;
use super::transaction::format_transaction_register;
use super::DisplayOptions;

/// Aggregate figures for a state
pub fn format_summary(state: &FinancialState, options: &DisplayOptions) -> String {
    let money = |m: Money| m.format_with_symbol(&options.currency_symbol);
    let sources = if state.income_sources.is_empty() {
        "(none)".to_string()
    } else {
        state.income_source_names().join(", ")
    };

    let mut output = String::new();
    output.push_str(&format!("Income sources:  {}\n", sources));
    output.push_str(&format!("Total income:    {}\n", money(state.total_income())));
    output.push_str(&format!("Total expenses:  {}\n", money(state.total_expenses())));
    output.push_str(&format!("Net:             {}\n", money(state.net())));
    output.push_str(&format!("Monthly debt:    {}\n", money(state.monthly_debt)));
    output.push_str(&format!("Savings:         {}\n", money(state.savings)));
    output
}

/// Full dashboard: summary, score card, then transactions in `sort` order
pub fn format_dashboard(
    state: &FinancialState,
    score: &ResilienceScore,
    sort: TransactionSort,
    options: &DisplayOptions,
) -> String {
    let mut output = String::new();
    output.push_str(&format_summary(state, options));
    output.push('\n');
    output.push_str(&format_score_card(score));
    output.push('\n');
    output.push_str(&format_transaction_register(
        &sort_transactions(&state.transactions, sort),
        options,
    ));
    output
}
