//! YAML Export functionality
//!
//! Exports a session snapshot to YAML for a human-readable copy.

use crate::error::{ResilienceError, ResilienceResult};
use crate::export::json::{SessionExport, Snapshot};
use crate::models::FinancialState;
use std::io::Write;

/// Export a session snapshot to YAML format
pub fn export_session_yaml<W: Write>(state: &FinancialState, writer: &mut W) -> ResilienceResult<()> {
    let export = SessionExport::from_state(state);

    writeln!(writer, "# Financial resilience session export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "#")?;
    writeln!(writer, "# Load it again with --state <file>.")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ResilienceError::Export(e.to_string()))?;

    Ok(())
}

/// Import a state from YAML, either a session export or a bare state
pub fn import_from_yaml(yaml_str: &str) -> ResilienceResult<FinancialState> {
    let snapshot: Snapshot =
        serde_yaml::from_str(yaml_str).map_err(|e| ResilienceError::Import(e.to_string()))?;

    snapshot.into_state().map_err(ResilienceError::Import)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeSource, IncomeSourceType, Money, Transaction, TransactionKind};

    #[test]
    fn test_yaml_export() {
        let mut state = FinancialState::onboarded(vec![IncomeSource::new(IncomeSourceType::SocialGrant)]);
        state.transactions.push(
            Transaction::new(TransactionKind::Income, Money::from_cents(53_000), "SASSA", "Social Grant")
                .recurring(true),
        );

        let mut output = Vec::new();
        export_session_yaml(&state, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Financial resilience session export"));
        assert!(yaml.contains("social_grant"));
        assert!(yaml.contains("SASSA"));

        // comment lines are ignored by the parser
        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported, state);
    }

    #[test]
    fn test_import_invalid_yaml() {
        let err = import_from_yaml("state: [not, a, state]").unwrap_err();
        assert!(matches!(err, ResilienceError::Import(_)));
    }
}
