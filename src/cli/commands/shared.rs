//! Shared components for CLI commands
//!
//! This module contains common types, configuration loading, logging setup
//! and report helpers used across the command implementations.

use crate::app::models::ValidationResult;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Statistics reported by every command
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandStats {
    /// Number of CSV files read
    pub files_processed: usize,
    /// Number of data rows read or written
    pub rows_processed: usize,
    /// Number of validation errors found
    pub errors_found: usize,
    /// Number of records written to the store
    pub records_written: usize,
    /// Files created by the command
    pub output_files: Vec<PathBuf>,
    /// Total processing time
    #[serde(skip)]
    pub processing_time: std::time::Duration,
}

/// Load configuration using layered approach (file -> env)
///
/// CLI flag overrides are applied by each command afterwards.
pub fn load_configuration(common: &CommonArgs) -> Result<Config> {
    let default_config_path = if common.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &common.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    Config::load_layered(config_file)
}

/// Set up structured logging based on CLI arguments and configuration
pub fn setup_logging(common: &CommonArgs, config: &Config) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level(&config.logging.level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("asset_csv={}", log_level)));

    let initialized = if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber already exists when commands run more than once in a process
    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    debug!("Configuration: {:?}", config);
}

/// Read an uploaded file as text
pub async fn read_upload(path: &std::path::Path) -> Result<String> {
    info!("Reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to encode report", e))?;
    println!("{}", json);
    Ok(())
}

/// Print a human-readable validation report for one upload
pub fn print_validation_report(label: &str, row_count: usize, result: &ValidationResult) {
    if result.valid {
        println!(
            "{} {} ({} rows)",
            "✔".bright_green().bold(),
            label.bright_white().bold(),
            row_count
        );
        return;
    }

    println!(
        "{} {} ({} rows, {} errors)",
        "✘".bright_red().bold(),
        label.bright_white().bold(),
        row_count,
        result.error_count().to_string().bright_red().bold()
    );
    for error in &result.errors {
        println!("   • {}", error);
    }
}
