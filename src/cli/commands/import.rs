//! Import command implementation
//!
//! Validates an upload and, only when it is clean, maps the rows to records
//! and upserts them into the store. A dry run replays the upsert against an
//! in-memory copy of the stored records to report what would change.

use super::shared::{
    CommandStats, load_configuration, print_json, print_validation_report, read_upload,
    setup_logging,
};
use crate::app::adapters::{JsonFileStore, MemoryStore, RecordStore, UpsertSummary};
use crate::app::models::{EntityKind, ValidationResult};
use crate::app::services::csv_engine::{parse_csv_named, parsed_to_records, validate_parsed};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of one import attempt
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub rows: usize,
    pub validation: ValidationResult,
    /// Present only when validation passed and the store was written
    pub summary: Option<UpsertSummary>,
}

/// Import command runner
pub async fn run_import(args: ImportArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let mut config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config);
    debug!("Import arguments: {:?}", args);

    args.validate()?;

    if let Some(store) = &args.store {
        config = config.with_store_path(store);
    }
    config.validate()?;

    let text = read_upload(&args.file).await?;
    let source = args.file.display().to_string();

    let mut store = JsonFileStore::new(&config.store.path);
    let outcome = if args.dry_run {
        info!("Dry run: the store will not be modified");
        let mut preview =
            MemoryStore::new().with_records(args.kind, store.fetch(args.kind)?);
        import_csv(&mut preview, args.kind, &text, &source)?
    } else {
        import_csv(&mut store, args.kind, &text, &source)?
    };

    let stats = CommandStats {
        files_processed: 1,
        rows_processed: outcome.rows,
        errors_found: outcome.validation.error_count(),
        records_written: if args.dry_run {
            0
        } else {
            outcome.summary.map_or(0, |s| s.total())
        },
        processing_time: start_time.elapsed(),
        ..Default::default()
    };

    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                print_validation_report(&source, outcome.rows, &outcome.validation);
                if let Some(summary) = outcome.summary {
                    let verb = if args.dry_run { "Would import" } else { "Imported" };
                    println!(
                        "{} {} {} records ({} new, {} updated)",
                        verb.bright_green().bold(),
                        summary.total(),
                        args.kind,
                        summary.inserted,
                        summary.updated
                    );
                }
            }
        }
        OutputFormat::Json => print_json(&outcome)?,
    }

    if !outcome.validation.valid {
        return Err(Error::validation_failed(outcome.validation.error_count()));
    }

    Ok(stats)
}

/// Parse, validate and, when valid, persist an upload
///
/// Validation findings are returned in the outcome, not as an error; the
/// store is only called when there are none.
pub fn import_csv<R: RecordStore + ?Sized>(
    store: &mut R,
    kind: EntityKind,
    text: &str,
    source: &str,
) -> Result<ImportOutcome> {
    let parsed = parse_csv_named(text, source)?;
    let validation = validate_parsed(kind, &parsed);

    if !validation.valid {
        warn!(
            "{} failed validation with {} error(s); nothing imported",
            source,
            validation.error_count()
        );
        return Ok(ImportOutcome {
            rows: parsed.row_count(),
            validation,
            summary: None,
        });
    }

    let records = parsed_to_records(kind.schema(), &parsed);
    let summary = store.upsert(kind, records)?;

    Ok(ImportOutcome {
        rows: parsed.row_count(),
        validation,
        summary: Some(summary),
    })
}
