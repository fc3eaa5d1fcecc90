//! Score CLI command
//!
//! Scores either a saved snapshot or five figures given on the command line.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::display::{format_score_card, format_summary, DisplayOptions};
use crate::error::{ResilienceError, ResilienceResult};
use crate::export::load_state;
use crate::scoring::{Pillar, ResilienceScore, ResilienceScoreCalculator, ScoreBand, ScoreInputs};

use super::output::{write_output, OutputFormat};

/// Arguments for `score`
#[derive(Args, Debug, Clone, Default)]
pub struct ScoreArgs {
    /// Snapshot to score (JSON or YAML, by extension)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["sources", "income", "expenses", "debt", "savings"]
    )]
    pub state: Option<PathBuf>,

    /// Number of declared income sources
    #[arg(long, default_value_t = 0)]
    pub sources: usize,

    /// Total logged income for the month
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub income: f64,

    /// Total logged expenses for the month
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub expenses: f64,

    /// Monthly debt repayments
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub debt: f64,

    /// Current savings balance (may be negative)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub savings: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Machine-readable result of `score`
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub inputs: ScoreInputs,
    pub score: ResilienceScore,
    pub band: ScoreBand,
    pub weakest: Pillar,
}

impl ScoreReport {
    pub fn new(inputs: ScoreInputs) -> Self {
        let score = ResilienceScoreCalculator::compute_inputs(&inputs);
        Self {
            inputs,
            score,
            band: score.band(),
            weakest: score.weakest_pillar(),
        }
    }
}

/// Handle the score command
pub fn handle_score_command<W: Write>(
    args: ScoreArgs,
    options: &DisplayOptions,
    out: &mut W,
) -> ResilienceResult<()> {
    let (inputs, summary) = match &args.state {
        Some(path) => {
            let state = load_state(path)?;
            (ScoreInputs::from_state(&state), Some(format_summary(&state, options)))
        }
        None => {
            for (name, value) in [
                ("income", args.income),
                ("expenses", args.expenses),
                ("debt", args.debt),
                ("savings", args.savings),
            ] {
                if !value.is_finite() {
                    return Err(ResilienceError::Validation(format!(
                        "--{} must be a finite number",
                        name
                    )));
                }
            }
            let inputs = ScoreInputs {
                income_source_count: args.sources,
                total_income: args.income,
                total_expenses: args.expenses,
                monthly_debt: args.debt,
                savings: args.savings,
            };
            (inputs, None)
        }
    };

    let report = ScoreReport::new(inputs);
    write_output(out, &report, args.format, || {
        let mut table = summary.unwrap_or_default();
        if !table.is_empty() {
            table.push('\n');
        }
        table.push_str(&format_score_card(&report.score));
        table
    })
}
