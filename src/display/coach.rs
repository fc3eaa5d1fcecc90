//! Advice and scam-verdict formatting

use crate::coach::{AdviceLine, AdviceLines, ScamAnalysis};

use super::round_points;

/// Render advice text as bullets and paragraphs
pub fn format_advice(text: &str) -> String {
    let mut output = String::from("AI Financial Coach\n");
    for line in AdviceLines::new(text) {
        match line {
            AdviceLine::Bullet(item) => output.push_str(&format!("  • {}\n", item)),
            AdviceLine::Paragraph(para) => output.push_str(&format!("{}\n", para)),
        }
    }
    output
}

/// Render a scam verdict
pub fn format_scam_analysis(analysis: &ScamAnalysis) -> String {
    format!(
        "{} (confidence {}%)\n{}\n",
        analysis.verdict(),
        round_points(analysis.confidence),
        analysis.explanation.trim()
    )
}
