//! JSON Export functionality
//!
//! Exports a session snapshot to JSON with schema versioning. The same
//! structure is what `--state` reads back.

use crate::error::{ResilienceError, ResilienceResult};
use crate::models::{FinancialState, Money};
use crate::scoring::ResilienceScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The financial state itself
    pub state: FinancialState,

    /// Score at export time, for reference; recomputed on import
    pub score: ResilienceScore,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub income_source_count: usize,
    pub transaction_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl SessionExport {
    /// Snapshot the given state
    pub fn from_state(state: &FinancialState) -> Self {
        let earliest_transaction = state
            .transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_rfc3339());
        let latest_transaction = state
            .transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_rfc3339());

        let metadata = ExportMetadata {
            income_source_count: state.income_sources.len(),
            transaction_count: state.transactions.len(),
            total_income: state.total_income(),
            total_expenses: state.total_expenses(),
            earliest_transaction,
            latest_transaction,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            state: state.clone(),
            score: ResilienceScore::for_state(state),
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        validate_state(&self.state)
    }
}

/// Check a state read from outside the application
pub fn validate_state(state: &FinancialState) -> Result<(), String> {
    let mut seen = HashSet::new();
    for source in &state.income_sources {
        if !seen.insert(source.id) {
            return Err(format!("Income source {} is listed twice", source.name));
        }
    }

    for (field, amount) in [("Monthly debt", state.monthly_debt), ("Savings", state.savings)] {
        if !amount.is_within_limit() {
            return Err(format!("{} {} is out of range", field, amount));
        }
    }

    let mut ids = HashSet::new();
    for txn in &state.transactions {
        if !ids.insert(txn.id) {
            return Err(format!("Transaction {} is listed twice", txn.id));
        }
        txn.validate()
            .map_err(|e| format!("Transaction {}: {}", txn.id, e))?;
    }

    Ok(())
}

/// Export a session snapshot to JSON
pub fn export_session_json<W: Write>(
    state: &FinancialState,
    writer: &mut W,
    pretty: bool,
) -> ResilienceResult<()> {
    let export = SessionExport::from_state(state);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ResilienceError::Export(e.to_string()))?;

    Ok(())
}

/// Either a full export or a bare state object
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Snapshot {
    Export(Box<SessionExport>),
    State(FinancialState),
}

impl Snapshot {
    /// The validated state inside the snapshot
    pub(crate) fn into_state(self) -> Result<FinancialState, String> {
        match self {
            Self::Export(export) => {
                export.validate()?;
                Ok(export.state)
            }
            Self::State(state) => {
                validate_state(&state)?;
                Ok(state)
            }
        }
    }
}

/// Import a state from JSON, either a session export or a bare state
pub fn import_from_json(json_str: &str) -> ResilienceResult<FinancialState> {
    let snapshot: Snapshot =
        serde_json::from_str(json_str).map_err(|e| ResilienceError::Import(e.to_string()))?;

    snapshot.into_state().map_err(ResilienceError::Import)
}
