//! Command-line argument definitions for asset-csv
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::models::EntityKind;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the asset CSV tool
///
/// Exports asset and employee records to CSV, produces import templates and
/// validates and imports CSV uploads.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "asset-csv",
    version,
    about = "Export, validate and import asset and employee CSV files",
    long_about = "CSV tooling for an asset-management backend. Exports stored assets and \
                  employees to dated CSV files, writes bulk-import templates, and validates \
                  uploads against the import schema, reporting every problem in one pass \
                  before anything is written to the store."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Export stored records to a dated CSV file
    Export(ExportArgs),
    /// Write a bulk-import template with an example row
    Template(TemplateArgs),
    /// Validate CSV files without importing them
    Validate(ValidateArgs),
    /// Validate a CSV file and import it into the store
    Import(ImportArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/asset-csv/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

impl CommonArgs {
    /// Log level implied by -v/-q, or `fallback` when neither is given
    pub fn get_log_level<'a>(&self, fallback: &'a str) -> &'a str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => fallback,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Entity kind to export
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: EntityKind,

    /// Record store file (overrides configuration)
    #[arg(short = 's', long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Directory receiving the CSV file (overrides configuration)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base file name; the current date and .csv are appended
    ///
    /// Defaults to "assets" or "employees".
    #[arg(short = 'b', long = "base", value_name = "NAME")]
    pub base: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ExportArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base {
            validate_base_name(base)?;
        }
        Ok(())
    }

    /// Base name to use for the download
    pub fn get_base(&self) -> String {
        self.base
            .clone()
            .unwrap_or_else(|| self.kind.export_base().to_string())
    }
}

/// Arguments for the template command
#[derive(Debug, Clone, Parser)]
pub struct TemplateArgs {
    /// Entity kind to generate a template for
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: EntityKind,

    /// Directory receiving the template (overrides configuration)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the template to stdout instead of writing a file
    #[arg(long = "stdout")]
    pub stdout: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Entity kind the files should contain
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: EntityKind,

    /// CSV files or directories to validate (directories are searched for *.csv)
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Path does not exist: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Show a progress bar only for multi-file runs in human mode
    pub fn show_progress(&self, file_count: usize) -> bool {
        file_count > 1 && !self.common.quiet && self.common.output_format == OutputFormat::Human
    }
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Entity kind the file contains
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: EntityKind,

    /// CSV file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Record store file (overrides configuration)
    #[arg(short = 's', long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Validate and map rows, but do not write to the store
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Import file does not exist: {}",
                self.file.display()
            )));
        }
        Ok(())
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

/// A base name becomes part of a file name; keep it to one path component
fn validate_base_name(base: &str) -> Result<()> {
    if base.trim().is_empty() {
        return Err(Error::configuration("Base file name cannot be empty"));
    }
    if base.contains('/') || base.contains('\\') {
        return Err(Error::configuration(format!(
            "Base file name must not contain path separators: '{}'",
            base
        )));
    }
    Ok(())
}
