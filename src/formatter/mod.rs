//! Output formatting for atlas-ops
//!
//! This module turns execution results into terminal output:
//! - Indented JSON for read operations (BSON types simplified)
//! - Bare per-line values for distinct listings
//! - Plain status lines for write operations

use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::executor::{ExecutionResult, ResultData};

mod bson;
mod json;

pub use json::JsonFormatter;

/// Main formatter for execution results
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,

    /// Indent width for pretty JSON
    indent: usize,
}

impl Formatter {
    /// Create a new formatter
    pub fn new(format_type: OutputFormat, use_colors: bool, indent: usize) -> Self {
        Self {
            format_type,
            use_colors,
            indent,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output, config.indent)
    }

    /// Format an execution result according to the configured format.
    ///
    /// Write results always render as status lines regardless of the
    /// JSON format choice; only document data switches between pretty,
    /// compact, and summary renderings.
    pub fn format(&self, result: &ExecutionResult) -> Result<String> {
        match &result.data {
            ResultData::InsertOne { inserted_id } => {
                Ok(format!("Inserted document with _id {inserted_id}"))
            }
            ResultData::Update { matched, modified } => Ok(format!(
                "Matched {matched} document(s) and modified {modified} document(s)."
            )),
            ResultData::UpdateAndFetch {
                matched,
                modified,
                document,
            } => {
                let doc = self.json_formatter().format_document(document)?;
                Ok(format!(
                    "Matched {matched} document(s) and modified {modified} document(s).\n{doc}"
                ))
            }
            data => match self.format_type {
                OutputFormat::Json | OutputFormat::JsonPretty => self.format_json(data),
                OutputFormat::Compact => Ok(self.format_compact(result)),
            },
        }
    }

    /// Format document data as JSON or bare value lines.
    fn format_json(&self, data: &ResultData) -> Result<String> {
        let formatter = self.json_formatter();
        match data {
            ResultData::Document(doc) => formatter.format_document(doc),
            ResultData::Documents(docs) => formatter.format_documents(docs),
            ResultData::Values(values) => Ok(values
                .iter()
                .map(bson::scalar_text)
                .collect::<Vec<_>>()
                .join("\n")),
            ResultData::None => Ok("null".to_string()),
            // Write variants are handled before dispatch.
            other => Ok(format!("{other:?}")),
        }
    }

    /// Summary-only rendering.
    fn format_compact(&self, result: &ExecutionResult) -> String {
        match &result.data {
            ResultData::Document(_) => "1 document returned".to_string(),
            ResultData::Documents(docs) => format!("{} document(s) returned", docs.len()),
            ResultData::Values(values) => format!("{} distinct value(s)", values.len()),
            ResultData::None => "no documents matched".to_string(),
            other => format!("{other:?}"),
        }
    }

    fn json_formatter(&self) -> JsonFormatter {
        JsonFormatter::new(self.format_type.is_pretty(), self.use_colors, self.indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutionStats;
    use mongodb::bson::{Bson, doc};

    fn result_with(data: ResultData) -> ExecutionResult {
        ExecutionResult::success(data, ExecutionStats::default())
    }

    #[test]
    fn test_update_status_line() {
        let formatter = Formatter::new(OutputFormat::JsonPretty, false, 4);
        let result = result_with(ResultData::Update {
            matched: 1,
            modified: 1,
        });
        assert_eq!(
            formatter.format(&result).unwrap(),
            "Matched 1 document(s) and modified 1 document(s)."
        );
    }

    #[test]
    fn test_insert_status_line() {
        let formatter = Formatter::new(OutputFormat::JsonPretty, false, 4);
        let result = result_with(ResultData::InsertOne {
            inserted_id: "ObjectId(\"628fe19b067c7f5640068623\")".to_string(),
        });
        let output = formatter.format(&result).unwrap();
        assert!(output.starts_with("Inserted document with _id"));
        assert!(output.contains("628fe19b067c7f5640068623"));
    }

    #[test]
    fn test_update_and_fetch_includes_document() {
        let formatter = Formatter::new(OutputFormat::JsonPretty, false, 4);
        let result = result_with(ResultData::UpdateAndFetch {
            matched: 1,
            modified: 1,
            document: doc! { "city": "LOST PUNKS", "pop": 43 },
        });
        let output = formatter.format(&result).unwrap();
        assert!(output.starts_with("Matched 1 document(s)"));
        assert!(output.contains("\"pop\": 43"));
    }

    #[test]
    fn test_distinct_values_one_per_line() {
        let formatter = Formatter::new(OutputFormat::JsonPretty, false, 4);
        let result = result_with(ResultData::Values(vec![
            Bson::String("A Tale of Love and Darkness".to_string()),
            Bson::String("New York, I Love You".to_string()),
        ]));
        let output = formatter.format(&result).unwrap();
        assert_eq!(
            output,
            "A Tale of Love and Darkness\nNew York, I Love You"
        );
    }

    #[test]
    fn test_not_found_renders_null() {
        let formatter = Formatter::new(OutputFormat::JsonPretty, false, 4);
        let result = result_with(ResultData::None);
        assert_eq!(formatter.format(&result).unwrap(), "null");
    }

    #[test]
    fn test_compact_summary() {
        let formatter = Formatter::new(OutputFormat::Compact, false, 4);
        let result = result_with(ResultData::Documents(vec![doc! {"a": 1}, doc! {"b": 2}]));
        assert_eq!(formatter.format(&result).unwrap(), "2 document(s) returned");
    }
}
