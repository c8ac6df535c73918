//! CSV engine for asset and employee records
//!
//! This module owns the whole CSV pipeline between the application and its
//! record store. Everything here is synchronous and free of ambient I/O:
//! downloads go through an injected [`DownloadSink`](crate::app::adapters::DownloadSink)
//! and persistence is left to the caller.
//!
//! ## Architecture
//!
//! - [`serializer`] - Records to CSV text, download file naming
//! - [`template`] - Per-kind import templates
//! - [`reader`] - Uploaded text to header + rows, same quoting grammar
//! - [`column_mapping`] - Header normalization and cell lookup
//! - [`validator`] - Exhaustive schema validation of an upload
//! - [`mapper`] - Validated rows to typed records
//!
//! ## Usage
//!
//! ```rust
//! use asset_csv::EntityKind;
//! use asset_csv::app::services::csv_engine::{parse_csv, rows_to_records, validate_parsed};
//!
//! let upload = "name,tag,category,status\nLaptop,A-1,Computers,READY";
//! let parsed = parse_csv(upload).unwrap();
//! let result = validate_parsed(EntityKind::Asset, &parsed);
//! assert!(result.valid);
//!
//! let records = rows_to_records(EntityKind::Asset.schema(), &parsed.headers, &parsed.rows);
//! assert_eq!(records[0].text("status").as_deref(), Some("ready"));
//! ```

pub mod column_mapping;
pub mod mapper;
pub mod reader;
pub mod serializer;
pub mod template;
pub mod validator;

#[cfg(test)]
mod tests;

// Re-export main operations for easy access
pub use column_mapping::ColumnMapping;
pub use mapper::{parsed_to_records, rows_to_records};
pub use reader::{parse_csv, parse_csv_named};
pub use serializer::{download_filename, escape_field, serialize, trigger_download};
pub use template::{generate_template, template_base_name};
pub use validator::{validate_import, validate_parsed, validate_with_schema};
