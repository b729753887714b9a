//! BSON value simplification for display
//!
//! Converts BSON values into plain JSON the way a human wants to read
//! them, rather than extended JSON:
//! - ObjectId -> 24-char hex string (not `{"$oid": ...}`)
//! - DateTime -> RFC 3339 string (not `{"$date": ...}`)
//! - Int64 -> plain number
//! - Decimal128 -> decimal string

use mongodb::bson::{Bson, DateTime, Document};
use serde_json::{Map, Value as JsonValue};

/// Convert DateTime to ISO 8601 string, falling back to the raw
/// millisecond timestamp for out-of-range dates.
fn datetime_to_iso_string(dt: &DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| format!("{}", dt.timestamp_millis()))
}

/// Convert a BSON value to simplified JSON.
pub fn simplify(value: &Bson) -> JsonValue {
    match value {
        Bson::Null => JsonValue::Null,
        Bson::Boolean(b) => JsonValue::Bool(*b),
        Bson::String(s) => JsonValue::String(s.clone()),
        Bson::Int32(n) => JsonValue::Number((*n).into()),
        Bson::Int64(n) => JsonValue::Number((*n).into()),
        Bson::Double(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(f.to_string())),
        Bson::ObjectId(oid) => JsonValue::String(oid.to_hex()),
        Bson::DateTime(dt) => JsonValue::String(datetime_to_iso_string(dt)),
        Bson::Decimal128(d) => JsonValue::String(d.to_string()),
        Bson::Array(arr) => JsonValue::Array(arr.iter().map(simplify).collect()),
        Bson::Document(doc) => simplify_document(doc),
        // Regex, Binary, Timestamp etc. fall back to the shell-style Display.
        other => JsonValue::String(other.to_string()),
    }
}

/// Convert a BSON document to a simplified JSON object, preserving key order.
pub fn simplify_document(doc: &Document) -> JsonValue {
    let mut map = Map::new();
    for (key, value) in doc {
        map.insert(key.clone(), simplify(value));
    }
    JsonValue::Object(map)
}

/// Render a scalar BSON value as a bare line of text.
///
/// Used for distinct-value listings where each value is printed on its
/// own line without JSON quoting.
pub fn scalar_text(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        other => match simplify(other) {
            JsonValue::String(s) => s,
            json => json.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{DateTime, doc};

    #[test]
    fn test_simplify_objectid() {
        let oid = ObjectId::parse_str("628fe19b067c7f5640068623").unwrap();
        assert_eq!(
            simplify(&Bson::ObjectId(oid)),
            JsonValue::String("628fe19b067c7f5640068623".to_string())
        );
    }

    #[test]
    fn test_simplify_datetime() {
        let dt = DateTime::from_millis(1701862788373);
        let json = simplify(&Bson::DateTime(dt));
        let s = json.as_str().unwrap();
        assert!(s.starts_with("2023-12-06"));
        assert!(!s.contains("$date"));
    }

    #[test]
    fn test_simplify_numbers() {
        assert_eq!(simplify(&Bson::Int32(50)), JsonValue::Number(50.into()));
        assert_eq!(simplify(&Bson::Int64(50)), JsonValue::Number(50.into()));
        assert_eq!(
            simplify(&Bson::Double(1.5)),
            JsonValue::Number(serde_json::Number::from_f64(1.5).unwrap())
        );
    }

    #[test]
    fn test_simplify_nested_document() {
        let doc = doc! { "loc": { "x": 1.0, "y": 2.0 }, "pop": 42 };
        let json = simplify_document(&doc);
        assert_eq!(json["loc"]["x"], 1.0);
        assert_eq!(json["pop"], 42);
    }

    #[test]
    fn test_scalar_text_unquoted_string() {
        let value = Bson::String("Back to the Future".to_string());
        assert_eq!(scalar_text(&value), "Back to the Future");
    }

    #[test]
    fn test_scalar_text_number() {
        assert_eq!(scalar_text(&Bson::Int32(7)), "7");
    }
}
