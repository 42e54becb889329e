//! Record and field value types
//!
//! A [`Record`] is an opaque mapping from field name to [`FieldValue`].
//! Records are built externally, loaded wholesale into a
//! [`SearchEngine`](crate::query::SearchEngine), and treated as immutable
//! for the duration of a query. Identity is positional within the loaded
//! dataset.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// A single field value: text, number, or date.
///
/// Serialized untagged, so a JSON number becomes [`FieldValue::Number`],
/// an ISO-8601 date string becomes [`FieldValue::Date`], and any other
/// string becomes [`FieldValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (stored as f64)
    Number(f64),
    /// Calendar date
    Date(NaiveDate),
    /// Free-form text
    Text(String),
}

impl FieldValue {
    /// Stringified form of the value, used by substring field matches.
    ///
    /// Dates render as ISO-8601 (`2024-03-01`); whole numbers render
    /// without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.to_string(),
        }
    }

    /// Numeric form of the value, used by comparisons.
    ///
    /// Text parses leniently (`"42"` compares as a number); dates are not
    /// numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Date(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// A record: field name to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    ///
    /// # Example
    /// ```
    /// use memquery::Record;
    /// let rec = Record::new()
    ///     .with_field("author", "John Smith")
    ///     .with_field("year", 2024);
    /// assert!(rec.contains_field("author"));
    /// ```
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether the record has the named field.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterator over the record's field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build records from a JSON array of flat objects.
///
/// Numbers become [`FieldValue::Number`], ISO-8601 date strings become
/// [`FieldValue::Date`], other strings and booleans become
/// [`FieldValue::Text`]. Null fields are skipped. Nested arrays or objects
/// are rejected as an ingestion error.
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(Error::Ingest(format!(
                "expected a JSON array of objects, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let map = match item {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::Ingest(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut record = Record::new();
        for (name, field) in map {
            match field {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(b) => record.set(name, b.to_string()),
                serde_json::Value::Number(n) => {
                    let n = n.as_f64().ok_or_else(|| {
                        Error::Ingest(format!("field '{}' is not representable as f64", name))
                    })?;
                    record.set(name, n);
                }
                serde_json::Value::String(s) => match s.parse::<NaiveDate>() {
                    Ok(date) => record.set(name, date),
                    Err(_) => record.set(name, s),
                },
                other => {
                    return Err(Error::Ingest(format!(
                        "field '{}' holds a nested {}, records are flat",
                        name,
                        json_kind(&other)
                    )))
                }
            }
        }
        records.push(record);
    }

    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_as_text() {
        assert_eq!(FieldValue::from("john").as_text(), "john");
        assert_eq!(FieldValue::from(2024i64).as_text(), "2024");
        assert_eq!(FieldValue::from(3.5).as_text(), "3.5");
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FieldValue::from(d).as_text(), "2024-03-01");
    }

    #[test]
    fn test_field_value_as_number() {
        assert_eq!(FieldValue::from(2024i64).as_number(), Some(2024.0));
        assert_eq!(FieldValue::from("42").as_number(), Some(42.0));
        assert_eq!(FieldValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(FieldValue::from("john").as_number(), None);
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FieldValue::from(d).as_number(), None);
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"[
            {"author": "John Smith", "year": 2024, "hired": "2021-06-15"},
            {"author": "Jane Doe", "active": true, "note": null}
        ]"#;
        let records = records_from_json(json).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(
            records[0].get("author"),
            Some(&FieldValue::Text("John Smith".to_string()))
        );
        assert_eq!(records[0].get("year"), Some(&FieldValue::Number(2024.0)));
        assert_eq!(
            records[0].get("hired"),
            Some(&FieldValue::Date(
                NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()
            ))
        );

        assert_eq!(
            records[1].get("active"),
            Some(&FieldValue::Text("true".to_string()))
        );
        assert!(!records[1].contains_field("note"));
    }

    #[test]
    fn test_records_from_json_rejects_nested() {
        let json = r#"[{"tags": ["a", "b"]}]"#;
        let result = records_from_json(json);
        assert!(matches!(result, Err(Error::Ingest(_))));
    }

    #[test]
    fn test_records_from_json_rejects_non_array() {
        let result = records_from_json(r#"{"author": "john"}"#);
        assert!(matches!(result, Err(Error::Ingest(_))));
    }
}
