//! Result rendering
//!
//! Formats a reconciled result set for human or machine consumption. The
//! renderers consume the result set as-is; they never reorder, dedupe, or
//! drop entries.

use crate::error::Result;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for rendered results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable `INPUT:`/`OUTPUT:` blocks
    #[default]
    Text,
    /// CSV with an `input,output` header
    Csv,
    /// Pretty-printed JSON array of `{input, output}` objects
    Json,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    input: &'a str,
    output: String,
}

/// Render a result set to a string in the requested format
pub fn render_results(results: &[(String, Outcome)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results)),
        OutputFormat::Csv => Ok(render_csv(results)),
        OutputFormat::Json => render_json(results),
    }
}

/// Render a result set and write it to a file
pub async fn save_results(
    results: &[(String, Outcome)],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    let rendered = render_results(results, format)?;
    tokio::fs::write(path, rendered).await?;
    Ok(())
}

fn render_text(results: &[(String, Outcome)]) -> String {
    let rule = "\u{2500}".repeat(40);
    results
        .iter()
        .map(|(input, outcome)| {
            format!("INPUT: {input}\nOUTPUT: {}\n{rule}", outcome.output_text())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_csv(results: &[(String, Outcome)]) -> String {
    let mut out = String::from("input,output\r\n");
    for (input, outcome) in results {
        out.push_str(&csv_field(input));
        out.push(',');
        out.push_str(&csv_field(&outcome.output_text()));
        out.push_str("\r\n");
    }
    out
}

/// Quote a CSV field per RFC 4180 when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_json(results: &[(String, Outcome)]) -> Result<String> {
    let rows: Vec<ResultRow<'_>> = results
        .iter()
        .map(|(input, outcome)| ResultRow {
            input,
            output: outcome.output_text(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> Vec<(String, Outcome)> {
        vec![
            ("hello".to_string(), Outcome::Success("hola".to_string())),
            (
                "broken".to_string(),
                Outcome::Failure("API error (HTTP 500): boom".to_string()),
            ),
        ]
    }

    #[test]
    fn text_format_renders_blocks_in_order() {
        let rendered = render_results(&sample_results(), OutputFormat::Text).unwrap();
        assert!(rendered.contains("INPUT: hello\nOUTPUT: hola"));
        assert!(rendered.contains("INPUT: broken\nOUTPUT: ERROR: API error (HTTP 500): boom"));
        let hello_pos = rendered.find("hello").unwrap();
        let broken_pos = rendered.find("broken").unwrap();
        assert!(hello_pos < broken_pos, "entries must keep input order");
    }

    #[test]
    fn csv_format_has_header_and_rows() {
        let rendered = render_results(&sample_results(), OutputFormat::Csv).unwrap();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("input,output"));
        assert_eq!(lines.next(), Some("hello,hola"));
    }

    #[test]
    fn csv_quotes_delimiters_and_doubles_quotes() {
        let results = vec![(
            "a,b".to_string(),
            Outcome::Success("say \"hi\"".to_string()),
        )];
        let rendered = render_results(&results, OutputFormat::Csv).unwrap();
        assert!(rendered.contains("\"a,b\",\"say \"\"hi\"\"\""));
    }

    #[test]
    fn csv_quotes_embedded_newlines() {
        let results = vec![("x".to_string(), Outcome::Success("line1\nline2".to_string()))];
        let rendered = render_results(&results, OutputFormat::Csv).unwrap();
        assert!(rendered.contains("x,\"line1\nline2\""));
    }

    #[test]
    fn json_format_round_trips_structure() {
        let rendered = render_results(&sample_results(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["input"], "hello");
        assert_eq!(parsed[0]["output"], "hola");
        assert_eq!(parsed[1]["output"], "ERROR: API error (HTTP 500): boom");
    }

    #[test]
    fn empty_results_render_cleanly() {
        assert_eq!(
            render_results(&[], OutputFormat::Json).unwrap().trim(),
            "[]"
        );
        assert_eq!(
            render_results(&[], OutputFormat::Csv).unwrap(),
            "input,output\r\n"
        );
        assert_eq!(render_results(&[], OutputFormat::Text).unwrap(), "");
    }

    #[tokio::test]
    async fn save_results_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        save_results(&sample_results(), &path, OutputFormat::Json)
            .await
            .unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("hola"));
    }

    #[test]
    fn output_format_deserializes_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(format, OutputFormat::Csv);
    }
}
