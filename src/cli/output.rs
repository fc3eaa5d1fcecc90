//! Output formatting for command results

use std::io::Write;

use serde::Serialize;

use crate::error::ResilienceResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Write a result in the requested format
///
/// `table` renders the human-readable form and is only called for
/// [`OutputFormat::Table`].
pub fn write_output<T, W, F>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
    table: F,
) -> ResilienceResult<()>
where
    T: Serialize,
    W: Write + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Table => write!(out, "{}", table())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(data)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(data)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_output_formats() {
        let data = json!({"overall": 86.25});

        let mut table = Vec::new();
        write_output(&mut table, &data, OutputFormat::Table, || "rendered\n".into()).unwrap();
        assert_eq!(String::from_utf8(table).unwrap(), "rendered\n");

        let mut json_out = Vec::new();
        write_output(&mut json_out, &data, OutputFormat::Json, || unreachable!()).unwrap();
        assert!(String::from_utf8(json_out).unwrap().contains("\"overall\": 86.25"));

        let mut yaml_out = Vec::new();
        write_output(&mut yaml_out, &data, OutputFormat::Yaml, || unreachable!()).unwrap();
        assert_eq!(String::from_utf8(yaml_out).unwrap(), "overall: 86.25\n");
    }
}
