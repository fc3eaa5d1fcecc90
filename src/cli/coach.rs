//! Advice and scan CLI commands
//!
//! Both talk to the generative backend. Failures are logged in full and
//! reported to the user with a short generic message.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::error;

use crate::coach::{
    AdviceService, GeminiClient, GenerativeBackend, ScamScanner, ADVICE_FAILURE_MESSAGE,
    SCAN_FAILURE_MESSAGE,
};
use crate::config::Settings;
use crate::display::{format_advice, format_scam_analysis};
use crate::error::{ResilienceError, ResilienceResult};
use crate::export::load_state;
use crate::models::FinancialState;
use crate::scoring::ResilienceScore;

use super::output::{write_output, OutputFormat};

/// Arguments for `advice`
#[derive(Args, Debug, Clone)]
pub struct AdviceArgs {
    /// Snapshot to get advice for (JSON or YAML, by extension)
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,
}

/// Arguments for `scan`
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// The suspicious message (quote it, or pass it as several words)
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Handle the advice command
pub fn handle_advice_command<W: Write>(
    settings: &Settings,
    args: AdviceArgs,
    out: &mut W,
) -> ResilienceResult<()> {
    let state = load_state(&args.state)?;
    let client = GeminiClient::from_settings(&settings.gemini)?;
    write_advice(&client, &state, out)
}

/// Fetch and print advice for a state
pub fn write_advice<W: Write>(
    backend: &dyn GenerativeBackend,
    state: &FinancialState,
    out: &mut W,
) -> ResilienceResult<()> {
    let score = ResilienceScore::for_state(state);
    match AdviceService::new(backend).fetch_advice(state, &score) {
        Ok(text) => {
            write!(out, "{}", format_advice(&text))?;
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "advice request failed");
            Err(ResilienceError::Service(ADVICE_FAILURE_MESSAGE.to_string()))
        }
    }
}

/// Handle the scan command
pub fn handle_scan_command<W: Write>(
    settings: &Settings,
    args: ScanArgs,
    out: &mut W,
) -> ResilienceResult<()> {
    let message = args.message.join(" ");
    if message.trim().is_empty() {
        return Err(ResilienceError::Validation(
            "Message to analyze cannot be empty".into(),
        ));
    }
    let client = GeminiClient::from_settings(&settings.gemini)?;
    write_scan(&client, &message, args.format, out)
}

/// Classify a message and print the verdict
pub fn write_scan<W: Write>(
    backend: &dyn GenerativeBackend,
    message: &str,
    format: OutputFormat,
    out: &mut W,
) -> ResilienceResult<()> {
    match ScamScanner::new(backend).analyze(message) {
        Ok(analysis) => write_output(out, &analysis, format, || format_scam_analysis(&analysis)),
        Err(e) if e.is_validation() => Err(e),
        Err(e) => {
            error!(error = %e, "scam analysis failed");
            Err(ResilienceError::Service(SCAN_FAILURE_MESSAGE.to_string()))
        }
    }
}
