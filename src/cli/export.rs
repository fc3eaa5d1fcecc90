//! CLI command for data export
//!
//! Converts a snapshot to JSON, YAML, or a transactions CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{ResilienceError, ResilienceResult};
use crate::export::{export_state, load_state, ExportFormat};

/// Arguments for `export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Snapshot to export (JSON or YAML, by extension)
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command<W: Write>(args: ExportArgs, stdout: &mut W) -> ResilienceResult<()> {
    let state = load_state(&args.state)?;

    match &args.output {
        Some(output) => {
            let file = File::create(output).map_err(|e| {
                ResilienceError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            export_state(&state, args.format, &mut writer)?;
            writer.flush()?;

            match args.format {
                ExportFormat::Csv => {
                    writeln!(
                        stdout,
                        "Exported {} transactions to: {}",
                        state.transactions.len(),
                        output.display()
                    )?;
                    writeln!(
                        stdout,
                        "Note: CSV format exports transactions only. Use JSON or YAML for a full snapshot."
                    )?;
                }
                ExportFormat::Json | ExportFormat::Yaml => {
                    writeln!(stdout, "Session exported to: {}", output.display())?;
                }
            }
        }
        None => export_state(&state, args.format, stdout)?,
    }

    Ok(())
}
