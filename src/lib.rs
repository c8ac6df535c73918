//! Asset CSV Library
//!
//! CSV import/export tooling for an asset-management backend. Assets and
//! employees live in a hosted store; this library owns the data-processing
//! layer in front of it.
//!
//! This library provides tools for:
//! - Serializing fetched records to CSV text with exact quoting rules
//! - Generating per-kind import templates with an example row
//! - Reading uploaded CSV text with the same quoting grammar
//! - Validating uploads against a schema with one consolidated error report
//! - Mapping validated rows to typed records and handing them to a store

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod schema;
    pub mod services {
        pub mod csv_engine;
    }
    pub mod adapters;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EntityKind, FieldValue, ParsedCsv, Record, ValidationResult};
pub use app::schema::Schema;
pub use config::Config;

/// Result type alias for asset CSV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for operations around the CSV pipeline
///
/// Validation findings are not errors: they are carried as data in
/// [`ValidationResult`]. This enum covers I/O, configuration and store
/// failures that stop a command.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Uploaded content is not usable as CSV at all
    #[error("CSV format error: {message}")]
    Format { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Entity kind not recognised
    #[error("Unknown entity kind: '{value}' (expected 'asset' or 'employee')")]
    UnknownEntityKind { value: String },

    /// Record store failure
    #[error("Record store error: {message}")]
    Store { message: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// One or more uploads did not validate; nothing was imported
    #[error("Validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a CSV format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown entity kind error
    pub fn unknown_entity_kind(value: impl Into<String>) -> Self {
        Self::UnknownEntityKind {
            value: value.into(),
        }
    }

    /// Create a record store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(error_count: usize) -> Self {
        Self::ValidationFailed { error_count }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
