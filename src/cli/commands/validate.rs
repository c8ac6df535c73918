//! Validate command implementation
//!
//! Checks one or more CSV uploads against the import schema without
//! touching the store. Directories are searched recursively for `*.csv`.

use super::shared::{
    CommandStats, load_configuration, print_json, print_validation_report, read_upload,
    setup_logging,
};
use crate::app::models::{EntityKind, ValidationResult};
use crate::app::services::csv_engine::{parse_csv_named, validate_parsed};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Validation outcome for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub rows: usize,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config);
    debug!("Validation arguments: {:?}", args);

    args.validate()?;

    let files = collect_csv_files(&args.paths)?;
    if files.is_empty() {
        return Err(Error::configuration("No CSV files found to validate"));
    }
    info!("Validating {} {} file(s)", files.len(), args.kind);

    let progress_bar = if args.show_progress(files.len()) {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        if let Some(pb) = &progress_bar {
            pb.set_message(file.display().to_string());
        }

        reports.push(validate_file(args.kind, file).await);

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    let stats = CommandStats {
        files_processed: reports.len(),
        rows_processed: reports.iter().map(|r| r.rows).sum(),
        errors_found: reports.iter().map(|r| r.result.error_count()).sum(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    };

    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                for report in &reports {
                    print_validation_report(
                        &report.file.display().to_string(),
                        report.rows,
                        &report.result,
                    );
                }
                println!(
                    "\n{} file(s), {} row(s), {} error(s) in {}",
                    stats.files_processed,
                    stats.rows_processed,
                    stats.errors_found,
                    HumanDuration(stats.processing_time)
                );
            }
        }
        OutputFormat::Json => print_json(&reports)?,
    }

    if stats.errors_found > 0 {
        return Err(Error::validation_failed(stats.errors_found));
    }

    Ok(stats)
}

/// Read, parse and validate one file; unreadable files become a one-error report
async fn validate_file(kind: EntityKind, file: &Path) -> FileReport {
    let label = file.display().to_string();
    let parsed = match read_upload(file).await {
        Ok(text) => parse_csv_named(&text, &label),
        Err(e) => Err(e),
    };

    match parsed {
        Ok(parsed) => FileReport {
            file: file.to_path_buf(),
            rows: parsed.row_count(),
            result: validate_parsed(kind, &parsed),
        },
        Err(e) => {
            warn!("Could not read {}: {}", label, e);
            FileReport {
                file: file.to_path_buf(),
                rows: 0,
                result: ValidationResult::from_errors(vec![e.to_string()]),
            }
        }
    }
}

/// Expand directories into the `*.csv` files beneath them, sorted per directory
pub fn collect_csv_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| {
                Error::configuration(format!("Failed to walk '{}': {}", path.display(), e))
            })?;
            if entry.file_type().is_file() && is_csv(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        debug!("Found {} CSV files under {}", found.len(), path.display());
        files.extend(found);
    }

    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}
