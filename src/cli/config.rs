//! Config CLI command

use std::io::Write;

use clap::Args;
use tracing::info;

use crate::coach::gemini::resolve_endpoint;
use crate::config::{ResiliencePaths, Settings};
use crate::error::ResilienceResult;

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Write the effective settings to the config file if it doesn't exist yet
    #[arg(long)]
    pub init: bool,
}

/// Print paths and effective settings
pub fn handle_config_command<W: Write>(
    paths: &ResiliencePaths,
    settings: &Settings,
    args: ConfigArgs,
    out: &mut W,
) -> ResilienceResult<()> {
    let settings_file = paths.settings_file();
    if args.init {
        if settings_file.exists() {
            writeln!(out, "Settings file already exists: {}", settings_file.display())?;
        } else {
            settings.save(paths)?;
            info!(path = %settings_file.display(), "wrote default settings");
            writeln!(out, "Wrote settings to: {}", settings_file.display())?;
        }
        writeln!(out)?;
    }
    let key_status = match settings.gemini.api_key() {
        Ok(_) => "set",
        Err(_) => "missing",
    };

    writeln!(out, "Resilience CLI Configuration")?;
    writeln!(out, "============================")?;
    writeln!(out, "Config directory: {}", paths.base_dir().display())?;
    writeln!(
        out,
        "Settings file:    {}{}",
        settings_file.display(),
        if settings_file.exists() { "" } else { " (not found, using defaults)" }
    )?;
    writeln!(out)?;
    writeln!(out, "Settings:")?;
    writeln!(out, "  Currency symbol: {}", settings.currency_symbol)?;
    writeln!(out, "  Date format:     {}", settings.date_format)?;
    writeln!(out, "  Log level:       {}", settings.log_level)?;
    writeln!(out, "  Gemini model:    {}", settings.gemini.model)?;
    match resolve_endpoint(&settings.gemini.endpoint, &settings.gemini.model) {
        Ok(url) => writeln!(out, "  Gemini endpoint: {}", url)?,
        Err(e) => writeln!(out, "  Gemini endpoint: {} ({})", settings.gemini.endpoint, e)?,
    }
    writeln!(
        out,
        "  API key:         {} (${})",
        key_status, settings.gemini.api_key_env
    )?;
    Ok(())
}
