//! Interactive session CLI command

use std::io;
use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::coach::GeminiClient;
use crate::config::Settings;
use crate::display::DisplayOptions;
use crate::error::{ResilienceError, ResilienceResult};
use crate::export::load_state;
use crate::session::{AppState, Session};

/// Arguments for `session`
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Start from a snapshot instead of onboarding (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

/// Handle the session command on stdin/stdout
pub fn handle_session_command(settings: &Settings, args: SessionArgs) -> ResilienceResult<()> {
    let app = match &args.state {
        Some(path) => AppState::with_state(load_state(path)?),
        None => AppState::default(),
    };

    let client = match GeminiClient::from_settings(&settings.gemini) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!(error = %e, "advice and scanning are unavailable");
            None
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(app, stdin.lock(), stdout.lock())
        .with_display_options(DisplayOptions::from(settings));
    if let Some(client) = &client {
        session = session.with_backend(client);
    }

    match session.run() {
        Err(ResilienceError::Cancelled(_)) => {
            println!();
            println!("Onboarding cancelled.");
            Ok(())
        }
        other => other,
    }
}
