//! Financial resilience scoring
//!
//! The deterministic heart of the application. See
//! [`ResilienceScoreCalculator`] for the model itself.

pub mod calculator;
pub mod score;

pub use calculator::{ResilienceScoreCalculator, ScoreInputs};
pub use score::{Pillar, ResilienceScore, ScoreBand};
