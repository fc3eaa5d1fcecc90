//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; callers decide where it goes. Scores
//! are rounded to whole points here and nowhere else.

pub mod coach;
pub mod dashboard;
pub mod score;
pub mod transaction;

pub use coach::{format_advice, format_scam_analysis};
pub use dashboard::{format_dashboard, format_summary};
pub use score::{format_score_card, format_score_line};
pub use transaction::{format_transaction_register, format_transaction_row};

use crate::config::Settings;

/// Presentation preferences taken from settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for DisplayOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

/// Round a score to whole points, halves rounding up
pub fn round_points(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
