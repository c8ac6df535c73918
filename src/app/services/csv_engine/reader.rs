//! Uploaded CSV text to header + rows
//!
//! RFC 4180 grammar: `"` quotes a field, `""` inside quotes is a literal
//! quote, and quoted fields may span lines. Cells are not trimmed and rows
//! may differ in length; the validator reports mismatches.

use crate::app::models::ParsedCsv;
use crate::{Error, Result};
use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// Parse CSV text from an unnamed upload
pub fn parse_csv(text: &str) -> Result<ParsedCsv> {
    parse_csv_named(text, "upload")
}

/// Parse CSV text, naming `source` in any error
pub fn parse_csv_named(text: &str, source: &str) -> Result<ParsedCsv> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(Error::format(format!("CSV file '{}' is empty", source)));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::csv_parsing(source, "Failed to read CSV headers", Some(e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            Error::csv_parsing(
                source,
                format!("Failed to parse CSV row {}", index + 1),
                Some(e),
            )
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        "Parsed {}: {} columns, {} rows",
        source,
        headers.len(),
        rows.len()
    );

    Ok(ParsedCsv::new(headers, rows))
}
