//! Resilience CLI - financial resilience tracking for informal-economy earners
//!
//! This library provides the core functionality for the `resilience` binary.
//! It turns a user's declared income sources, logged transactions, monthly
//! debt and savings into a 0-100 financial resilience score, and talks to a
//! generative-language API for coaching tips and scam-message checks.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `telemetry`: Diagnostic logging setup
//! - `models`: Core data models (income sources, transactions, state)
//! - `scoring`: The resilience score calculator
//! - `services`: Validated state mutations and listing order
//! - `coach`: Advice and scam classification over a generative backend
//! - `setup`: First-run onboarding
//! - `session`: Interactive session loop
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV snapshots
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use resilience_cli::scoring::ResilienceScoreCalculator;
//!
//! let score = ResilienceScoreCalculator::compute(2, 5000.0, 3000.0, 500.0, 3000.0);
//! assert_eq!(score.overall, 86.25);
//! ```

pub mod cli;
pub mod coach;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod scoring;
pub mod services;
pub mod session;
pub mod setup;
pub mod telemetry;

pub use error::ResilienceError;
