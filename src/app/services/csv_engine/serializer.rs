//! Record to CSV serialization and download triggering
//!
//! Quoting rule: a value is wrapped in double quotes, with inner quotes
//! doubled, when it contains a comma, a double quote, a line break or any
//! non-ASCII character. [`super::reader::parse_csv`] reads the same grammar.

use crate::app::adapters::DownloadSink;
use crate::app::models::{FieldValue, Record};
use crate::constants::{CSV_EXTENSION, DOWNLOAD_DATE_FORMAT};
use crate::Result;
use chrono::{Local, NaiveDate};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::{debug, info};

/// Check whether a rendered value must be quoted
pub fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r') || !c.is_ascii())
}

/// Quote a rendered value when the quoting rule requires it
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if needs_quoting(value) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Serialize records to CSV text
///
/// The header is taken from the first record's fields, in order. Later
/// records missing one of those fields render it as an empty cell; fields
/// not in the header are dropped. Lines are joined with `\n` and there is no
/// trailing newline. An empty slice yields an empty string.
pub fn serialize(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.field_names().collect();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_line(headers.iter().map(|h| Cow::Borrowed(*h))));

    let mut ragged = 0;
    for record in records {
        if record.len() != headers.len() || headers.iter().any(|h| record.get(h).is_none()) {
            ragged += 1;
        }

        let cells = headers.iter().map(|header| {
            Cow::Owned(record.get(header).map(FieldValue::render).unwrap_or_default())
        });
        lines.push(join_line(cells));
    }

    if ragged > 0 {
        debug!(
            "{} of {} records do not match the header fields; missing values left empty",
            ragged,
            records.len()
        );
    }

    lines.join("\n")
}

fn join_line<'a>(cells: impl Iterator<Item = Cow<'a, str>>) -> String {
    cells
        .map(|cell| escape_field(&cell).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Download file name: `<base>-<YYYY-MM-DD>.csv`
pub fn download_filename(base: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        base,
        date.format(DOWNLOAD_DATE_FORMAT),
        CSV_EXTENSION
    )
}

/// Hand CSV text to a sink under a file name dated today
pub fn trigger_download<S: DownloadSink + ?Sized>(
    sink: &mut S,
    csv_text: &str,
    base: &str,
) -> Result<PathBuf> {
    let filename = download_filename(base, Local::now().date_naive());
    let location = sink.save(&filename, csv_text)?;

    info!(
        "Saved {} ({} bytes) to {}",
        filename,
        csv_text.len(),
        location.display()
    );

    Ok(location)
}
