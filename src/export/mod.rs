//! Export module for the resilience tracker
//!
//! Session snapshots are written on request only:
//! - CSV: logged transactions (spreadsheet-compatible)
//! - JSON: full snapshot, also the default `--state` input
//! - YAML: full snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{
    export_session_json, import_from_json, validate_state, ExportMetadata, SessionExport,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_session_yaml, import_from_yaml};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ResilienceError, ResilienceResult};
use crate::models::FinancialState;

/// File format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Pick a format from a file extension; JSON when unknown
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Write a state in the given format
pub fn export_state<W: Write>(
    state: &FinancialState,
    format: ExportFormat,
    writer: &mut W,
) -> ResilienceResult<()> {
    match format {
        ExportFormat::Json => {
            export_session_json(state, writer, true)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => export_session_yaml(state, writer)?,
        ExportFormat::Csv => export_transactions_csv(state, &mut *writer)?,
    }
    Ok(())
}

/// Write a state to a file, choosing the format from its extension
pub fn export_to_path(state: &FinancialState, path: &Path) -> ResilienceResult<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let file = File::create(path).map_err(|e| {
        ResilienceError::Export(format!("Cannot create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_state(state, format, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), ?format, "exported session");
    Ok(format)
}

/// Load a state from a JSON or YAML file (by extension)
///
/// Accepts the files written by [`export_to_path`] as well as a bare
/// `FinancialState` object. The state is validated before it is returned.
pub fn load_state(path: &Path) -> ResilienceResult<FinancialState> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ResilienceError::Import(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let imported = match ExportFormat::from_path(path) {
        ExportFormat::Yaml => import_from_yaml(&contents),
        ExportFormat::Json => import_from_json(&contents),
        ExportFormat::Csv => {
            return Err(ResilienceError::Import(
                "CSV files hold transactions only; use a JSON or YAML snapshot".into(),
            ))
        }
    };
    let state = imported.map_err(|e| match e {
        ResilienceError::Import(msg) => {
            ResilienceError::Import(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    debug!(
        path = %path.display(),
        transactions = state.transactions.len(),
        "loaded state"
    );
    Ok(state)
}
