//! Validated rows to typed records
//!
//! Runs after validation has passed. Values are trimmed, blanks become null,
//! whole-number fields become integers, decimal fields keep their validated
//! text and enum values take their canonical lower-case spelling. Columns
//! absent from the upload are left out of the record so that an update does
//! not clear them.

use super::column_mapping::ColumnMapping;
use crate::app::models::{FieldValue, ParsedCsv, Record};
use crate::app::schema::{FieldConstraint, Schema};
use tracing::warn;

/// Map every data row to a record in schema field order
pub fn rows_to_records(schema: &Schema, headers: &[String], rows: &[Vec<String>]) -> Vec<Record> {
    let mapping = ColumnMapping::analyze(headers);
    rows.iter()
        .map(|row| row_to_record(schema, &mapping, row))
        .collect()
}

/// Convenience wrapper over [`rows_to_records`] for a [`ParsedCsv`]
pub fn parsed_to_records(schema: &Schema, parsed: &ParsedCsv) -> Vec<Record> {
    rows_to_records(schema, &parsed.headers, &parsed.rows)
}

fn row_to_record(schema: &Schema, mapping: &ColumnMapping, row: &[String]) -> Record {
    let mut record = Record::new();

    for field in schema.fields.iter().copied() {
        if !mapping.has_column(field) {
            continue;
        }

        let value = mapping.cell(row, field).map(str::trim).unwrap_or_default();
        record.insert(field, coerce(schema, field, value));
    }

    record
}

fn coerce(schema: &Schema, field: &str, value: &str) -> FieldValue {
    if value.is_empty() {
        return FieldValue::Null;
    }

    match schema.rule_for(field).map(|rule| rule.constraint) {
        Some(FieldConstraint::Integer) => match value.parse::<i64>() {
            Ok(number) => FieldValue::Integer(number),
            Err(e) => {
                warn!("Keeping {} '{}' as text: {}", field, value, e);
                FieldValue::from(value)
            }
        },
        // Decimals keep their written form ("1999.00" stays "1999.00")
        Some(FieldConstraint::Decimal) => FieldValue::from(value),
        Some(FieldConstraint::OneOf(allowed)) => allowed
            .iter()
            .find(|option| option.eq_ignore_ascii_case(value))
            .map_or_else(|| FieldValue::from(value), |option| FieldValue::from(*option)),
        None => FieldValue::from(value),
    }
}
