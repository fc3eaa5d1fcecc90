//! Score display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::scoring::{ResilienceScore, ScoreBand};

use super::round_points;

#[derive(Tabled)]
struct PillarRow {
    #[tabled(rename = "Pillar")]
    pillar: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Band")]
    band: ScoreBand,
}

/// One-line headline, e.g. `Financial Resilience Score: 86/100 (Strong)`
pub fn format_score_line(score: &ResilienceScore) -> String {
    format!(
        "Financial Resilience Score: {}/100 ({})",
        round_points(score.overall),
        score.band()
    )
}

/// Headline plus a table of the four sub-scores
pub fn format_score_card(score: &ResilienceScore) -> String {
    let rows: Vec<PillarRow> = score
        .pillars()
        .into_iter()
        .map(|(pillar, value)| PillarRow {
            pillar: pillar.label(),
            score: format!("{}/100", round_points(value)),
            band: ScoreBand::of(value),
        })
        .collect();

    let mut output = String::new();
    output.push_str(&format_score_line(score));
    output.push('\n');
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output.push_str(&format!("Weakest area: {}\n", score.weakest_pillar()));
    output
}
