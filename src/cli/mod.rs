//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod coach;
pub mod config;
pub mod export;
pub mod output;
pub mod score;
pub mod session;

pub use coach::{handle_advice_command, handle_scan_command, AdviceArgs, ScanArgs};
pub use config::{handle_config_command, ConfigArgs};
pub use export::{handle_export_command, ExportArgs};
pub use output::{write_output, OutputFormat};
pub use score::{handle_score_command, ScoreArgs, ScoreReport};
pub use session::{handle_session_command, SessionArgs};
