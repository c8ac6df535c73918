//! Import validation against an entity schema
//!
//! Validation is exhaustive: a header problem does not stop row checks and
//! a bad row does not stop later rows, so one pass yields the full report.
//! Row numbers are 1-based data-row positions (the header is not counted).

use super::column_mapping::ColumnMapping;
use crate::app::models::{EntityKind, ParsedCsv, ValidationResult};
use crate::app::schema::Schema;
use tracing::{debug, info};

/// Validate a parsed upload for the given entity kind
pub fn validate_import(kind: EntityKind, headers: &[String], rows: &[Vec<String>]) -> ValidationResult {
    validate_with_schema(kind.schema(), headers, rows)
}

/// Validate a [`ParsedCsv`] for the given entity kind
pub fn validate_parsed(kind: EntityKind, parsed: &ParsedCsv) -> ValidationResult {
    validate_import(kind, &parsed.headers, &parsed.rows)
}

/// Validate headers and rows against an explicit schema
pub fn validate_with_schema(
    schema: &Schema,
    headers: &[String],
    rows: &[Vec<String>],
) -> ValidationResult {
    let mapping = ColumnMapping::analyze(headers);
    let mut errors = Vec::new();

    let missing_columns = mapping.missing(schema.required);
    if !missing_columns.is_empty() {
        errors.push(format!(
            "Missing required {}: {}",
            plural(missing_columns.len(), "column", "columns"),
            missing_columns.join(", ")
        ));
    }

    let unknown = mapping.unknown_columns(schema);
    if !unknown.is_empty() {
        debug!("Ignoring unknown {} columns: {:?}", schema.name, unknown);
    }

    for (index, row) in rows.iter().enumerate() {
        check_row(schema, &mapping, index + 1, row, &mut errors);
    }

    let result = ValidationResult::from_errors(errors);
    info!(
        "Validated {} {} rows: {} error(s)",
        rows.len(),
        schema.name,
        result.error_count()
    );
    result
}

fn check_row(
    schema: &Schema,
    mapping: &ColumnMapping,
    row_number: usize,
    row: &[String],
    errors: &mut Vec<String>,
) {
    if row.len() != mapping.width {
        errors.push(format!(
            "Row {}: Expected {} columns but found {}",
            row_number,
            mapping.width,
            row.len()
        ));
    }

    // Fields without a column were already reported at header level
    let missing_values: Vec<&str> = schema
        .required
        .iter()
        .copied()
        .filter(|field| mapping.has_column(field))
        .filter(|field| mapping.cell(row, field).is_none_or(|v| v.trim().is_empty()))
        .collect();
    if !missing_values.is_empty() {
        errors.push(format!(
            "Row {}: Missing required {}: {}",
            row_number,
            plural(missing_values.len(), "field", "fields"),
            missing_values.join(", ")
        ));
    }

    for rule in &schema.rules {
        let Some(value) = mapping
            .cell(row, rule.field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
        else {
            continue;
        };

        if !rule.constraint.accepts(value) {
            errors.push(format!(
                "Row {}: {}",
                row_number,
                rule.constraint.violation(rule.field, value)
            ));
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
