//! Core data models for the CSV pipeline
//!
//! Defines entity kinds, scalar field values, ordered records, parsed CSV
//! uploads and validation results used throughout the library.

use crate::app::schema::{self, Schema};
use crate::constants::{ASSET_EXPORT_BASE, EMPLOYEE_EXPORT_BASE};
use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The two record families managed by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Asset,
    Employee,
}

impl EntityKind {
    /// Lower-case name used in file names and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Employee => "employee",
        }
    }

    /// Schema governing import and templates for this kind
    pub fn schema(&self) -> &'static Schema {
        match self {
            EntityKind::Asset => schema::asset_schema(),
            EntityKind::Employee => schema::employee_schema(),
        }
    }

    /// Field that identifies a record when upserting into a store
    pub fn key_field(&self) -> &'static str {
        match self {
            EntityKind::Asset => "tag",
            EntityKind::Employee => "email",
        }
    }

    /// Default base name for export downloads
    pub fn export_base(&self) -> &'static str {
        match self {
            EntityKind::Asset => ASSET_EXPORT_BASE,
            EntityKind::Employee => EMPLOYEE_EXPORT_BASE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asset" | "assets" => Ok(EntityKind::Asset),
            "employee" | "employees" => Ok(EntityKind::Employee),
            _ => Err(Error::unknown_entity_kind(s)),
        }
    }
}

/// Scalar value held by a record field
///
/// Whole numbers are held exactly as `Integer`; `Number` holds values that
/// arrive as floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Text as it appears in a CSV cell, before quoting
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(number) => write!(f, "{}", number),
            FieldValue::Number(number) => f.write_str(&format_number(*number)),
        }
    }
}

/// Whole numbers print without a fractional part (`1`, not `1.0`)
fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One asset or employee as an ordered field-name-to-value mapping
///
/// Field order is insertion order; it decides the column order when the
/// record heads an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, replacing the value in place if the field already exists
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Field value as trimmed text, `None` when absent, null or blank
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(FieldValue::render)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overlay every field of `other` onto this record
    pub fn merge(&mut self, other: &Record) {
        for (name, value) in other.iter() {
            self.insert(name, value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field names to strings, numbers or null")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
                    record.insert(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Uploaded CSV split into a header row and data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedCsv {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of validating an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no errors were found
    pub valid: bool,

    /// Human-readable findings in discovery order
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!(EntityKind::from_str("asset").unwrap(), EntityKind::Asset);
        assert_eq!(EntityKind::from_str(" Assets ").unwrap(), EntityKind::Asset);
        assert_eq!(
            EntityKind::from_str("EMPLOYEE").unwrap(),
            EntityKind::Employee
        );
        assert!(matches!(
            EntityKind::from_str("vehicle"),
            Err(Error::UnknownEntityKind { .. })
        ));
    }

    #[test]
    fn test_field_value_rendering() {
        assert_eq!(FieldValue::Null.render(), "");
        assert_eq!(FieldValue::from("abc").render(), "abc");
        assert_eq!(FieldValue::from(1).render(), "1");
        assert_eq!(FieldValue::from(12.5).render(), "12.5");
        assert_eq!(FieldValue::from(-3.0).render(), "-3");
        assert_eq!(FieldValue::from(9_007_199_254_740_993_i64).render(), "9007199254740993");
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
    }

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        record.insert("a", "x");

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::from("x")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_text_trims_and_filters() {
        let record = Record::new()
            .with("name", "  Laptop ")
            .with("blank", "   ")
            .with("missing", FieldValue::Null);

        assert_eq!(record.text("name"), Some("Laptop".to_string()));
        assert_eq!(record.text("blank"), None);
        assert_eq!(record.text("missing"), None);
        assert_eq!(record.text("absent"), None);
    }

    #[test]
    fn test_record_json_preserves_field_order() {
        let json = r#"{"tag":"A-1","name":"Laptop","qty":2,"notes":null}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["tag", "name", "qty", "notes"]);
        assert_eq!(record.get("qty"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get("notes"), Some(&FieldValue::Null));

        let back = serde_json::to_string(&record).unwrap();
        assert!(back.starts_with(r#"{"tag":"A-1","name":"Laptop""#));
    }

    #[test]
    fn test_record_json_keeps_large_integers_exact() {
        let json = r#"{"qty":9007199254740993,"weight":2.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get("qty"), Some(&FieldValue::Integer(9_007_199_254_740_993)));
        assert_eq!(record.get("weight"), Some(&FieldValue::Number(2.5)));
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_validation_result_from_errors() {
        let ok = ValidationResult::from_errors(vec![]);
        assert!(ok.valid);
        assert_eq!(ok.error_count(), 0);

        let bad = ValidationResult::from_errors(vec!["Row 1: oops".to_string()]);
        assert!(!bad.valid);
        assert_eq!(bad.error_count(), 1);
    }
}
