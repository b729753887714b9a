//! JSON formatting for MongoDB documents
//!
//! Pretty-printed and compact JSON output with BSON type simplification
//! and optional color highlighting.

use colored_json::prelude::*;
use mongodb::bson::Document;

use super::bson::simplify_document;
use crate::error::Result;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Indent width for pretty printing
    indent: usize,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool, use_colors: bool, indent: usize) -> Self {
        Self {
            pretty,
            indent,
            use_colors,
        }
    }

    /// Format a single document as JSON.
    pub fn format_document(&self, doc: &Document) -> Result<String> {
        let json_value = simplify_document(doc);

        let json_str = if self.pretty {
            self.to_pretty_string(&json_value)
                .unwrap_or_else(|_| format!("{:?}", doc))
        } else {
            serde_json::to_string(&json_value).unwrap_or_else(|_| format!("{:?}", doc))
        };

        // Only apply colors for pretty-printed JSON; compact JSON stays
        // clean for piping and logging.
        if self.use_colors && self.pretty {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Format a list of documents, one JSON rendering per document.
    ///
    /// Documents are printed individually rather than wrapped in an
    /// array, so each record stands alone in the output stream.
    pub fn format_documents(&self, docs: &[Document]) -> Result<String> {
        let rendered: Result<Vec<String>> =
            docs.iter().map(|doc| self.format_document(doc)).collect();
        Ok(rendered?.join("\n"))
    }

    /// Convert a value to pretty-printed JSON with the configured indent.
    fn to_pretty_string<T: serde::Serialize>(
        &self,
        value: &T,
    ) -> std::result::Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, false, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_pretty_document() {
        let formatter = JsonFormatter::new(true, false, 4);
        let doc = doc! { "city": "LOST PUNKS", "pop": 42 };
        let result = formatter.format_document(&doc).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("    \"city\": \"LOST PUNKS\""));
        assert!(result.contains("\"pop\": 42"));
    }

    #[test]
    fn test_compact_document() {
        let formatter = JsonFormatter::new(false, false, 4);
        let doc = doc! { "city": "LOST PUNKS", "pop": 42 };
        let result = formatter.format_document(&doc).unwrap();
        assert!(!result.contains('\n'));
        assert_eq!(result, r#"{"city":"LOST PUNKS","pop":42}"#);
    }

    #[test]
    fn test_objectid_simplified() {
        use mongodb::bson::oid::ObjectId;
        let formatter = JsonFormatter::new(true, false, 2);
        let oid = ObjectId::parse_str("628fe19b067c7f5640068623").unwrap();
        let doc = doc! { "_id": oid };
        let result = formatter.format_document(&doc).unwrap();
        assert!(result.contains("\"628fe19b067c7f5640068623\""));
        assert!(!result.contains("$oid"));
    }

    #[test]
    fn test_documents_rendered_individually() {
        let formatter = JsonFormatter::new(false, false, 4);
        let docs = vec![doc! { "a": 1 }, doc! { "b": 2 }];
        let result = formatter.format_documents(&docs).unwrap();
        assert_eq!(result, "{\"a\":1}\n{\"b\":2}");
        assert!(!result.starts_with('['), "documents must not be wrapped in an array");
    }
}
