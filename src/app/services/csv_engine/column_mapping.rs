//! Header lookup for uploaded CSV files
//!
//! Maps normalized header names to column positions so that values can be
//! located by field name regardless of the column order a user chose.

use crate::app::schema::Schema;
use std::collections::HashMap;

/// Column mapping for an uploaded header row
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Normalized column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Number of columns in the header row
    pub width: usize,
}

impl ColumnMapping {
    /// Build the mapping; when a header repeats, the first occurrence wins
    pub fn analyze(headers: &[String]) -> Self {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            name_to_index.entry(normalize(header)).or_insert(index);
        }

        ColumnMapping {
            name_to_index,
            width: headers.len(),
        }
    }

    /// Get the index for a given field name
    pub fn get_index(&self, field: &str) -> Option<usize> {
        self.name_to_index.get(field).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, field: &str) -> bool {
        self.name_to_index.contains_key(field)
    }

    /// Fields from `fields` that have no column, in the order given
    pub fn missing<'a>(&self, fields: &[&'a str]) -> Vec<&'a str> {
        fields
            .iter()
            .copied()
            .filter(|field| !self.has_column(field))
            .collect()
    }

    /// Cell for a field in a row; `None` when the column or the cell is absent
    pub fn cell<'r>(&self, row: &'r [String], field: &str) -> Option<&'r str> {
        self.get_index(field)
            .and_then(|index| row.get(index))
            .map(String::as_str)
    }

    /// Header names the schema does not know about, sorted
    pub fn unknown_columns(&self, schema: &Schema) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .name_to_index
            .keys()
            .filter(|name| !name.is_empty() && !schema.has_field(name))
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }
}

/// Comparison form of a header: trimmed and lower-cased
pub fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}
