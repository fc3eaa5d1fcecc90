//! First-run onboarding
//!
//! Provides the interactive flow that collects a user's income sources
//! before the dashboard opens.

pub mod onboarding;

pub use onboarding::{parse_selection, OnboardingWizard};
