//! Export command implementation
//!
//! Fetches every record of a kind from the store, lays them out on the
//! kind's schema columns, serializes them and saves the result as
//! `<base>-<YYYY-MM-DD>.csv`.

use super::shared::{CommandStats, load_configuration, print_json, setup_logging};
use crate::app::adapters::{DownloadSink, FileSystemSink, JsonFileStore, RecordStore};
use crate::app::models::{EntityKind, FieldValue, Record};
use crate::app::services::csv_engine::{serialize, trigger_download};
use crate::cli::args::{ExportArgs, OutputFormat};
use crate::Result;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of exporting one entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub record_count: usize,
}

/// Export command runner
pub async fn run_export(args: ExportArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let mut config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config);
    debug!("Export arguments: {:?}", args);

    args.validate()?;

    // Apply CLI argument overrides
    if let Some(store) = &args.store {
        config = config.with_store_path(store);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    config.validate()?;

    info!(
        "Exporting {} records from {}",
        args.kind,
        config.store.path.display()
    );

    let store = JsonFileStore::new(&config.store.path);
    let mut sink = FileSystemSink::new(&config.export.output_dir);
    let outcome = export_records(&store, &mut sink, args.kind, &args.get_base())?;

    let stats = CommandStats {
        rows_processed: outcome.record_count,
        output_files: vec![outcome.path.clone()],
        processing_time: start_time.elapsed(),
        ..Default::default()
    };

    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                println!(
                    "{} Exported {} {} records to {}",
                    "✔".bright_green().bold(),
                    outcome.record_count.to_string().bright_white().bold(),
                    args.kind,
                    outcome.path.display()
                );
            }
        }
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(stats)
}

/// Fetch, serialize and save records of one kind
pub fn export_records<R, S>(
    store: &R,
    sink: &mut S,
    kind: EntityKind,
    base: &str,
) -> Result<ExportOutcome>
where
    R: RecordStore + ?Sized,
    S: DownloadSink + ?Sized,
{
    let records = store.fetch(kind)?;
    if records.is_empty() {
        warn!("No {} records in store; the export will be empty", kind);
    }

    let csv_text = serialize(&align_to_schema(kind, &records));
    let path = trigger_download(sink, &csv_text, base)?;

    Ok(ExportOutcome {
        path,
        record_count: records.len(),
    })
}

/// Give every record the schema's columns, in schema order
///
/// Stored records only carry the fields their uploads had. Missing fields
/// become null cells; stored fields outside the schema follow as extra
/// columns in first-seen order.
fn align_to_schema(kind: EntityKind, records: &[Record]) -> Vec<Record> {
    let mut columns: Vec<&str> = kind.schema().fields.to_vec();
    for record in records {
        for name in record.field_names() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }

    let extra = columns.len() - kind.schema().fields.len();
    if extra > 0 {
        debug!("Exporting {} stored {} field(s) outside the schema", extra, kind);
    }

    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| (*column, record.get(column).cloned().unwrap_or(FieldValue::Null)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::{MemorySink, MemoryStore};
    use crate::app::services::csv_engine::parse_csv;
    use crate::cli::commands::import::import_csv;
    use crate::constants::{ASSET_FIELDS, EMPLOYEE_FIELDS};

    #[test]
    fn test_export_records_writes_serialized_csv() {
        let store = MemoryStore::new().with_records(
            EntityKind::Asset,
            vec![
                Record::new().with("name", "Laptop").with("tag", "A-1"),
                Record::new().with("name", "Desk, standing").with("tag", "A-2"),
            ],
        );
        let mut sink = MemorySink::new();

        let outcome = export_records(&store, &mut sink, EntityKind::Asset, "assets").unwrap();

        assert_eq!(outcome.record_count, 2);
        let (name, contents) = sink.last().unwrap();
        assert!(name.starts_with("assets-"));
        assert_eq!(
            contents,
            format!(
                "{}\nLaptop,A-1{}\n\"Desk, standing\",A-2{}",
                ASSET_FIELDS.join(","),
                ",".repeat(12),
                ",".repeat(12)
            )
        );
    }

    #[test]
    fn test_export_keeps_columns_missing_from_first_record() {
        let mut store = MemoryStore::new();
        import_csv(
            &mut store,
            EntityKind::Asset,
            "name,tag,category,status\nA,T1,C,ready\n",
            "first.csv",
        )
        .unwrap();
        import_csv(
            &mut store,
            EntityKind::Asset,
            "name,tag,category,status,qty,purchase_cost\nB,T2,C,ready,5,12.50\n",
            "second.csv",
        )
        .unwrap();
        let mut sink = MemorySink::new();

        export_records(&store, &mut sink, EntityKind::Asset, "assets").unwrap();

        let parsed = parse_csv(sink.last().unwrap().1).unwrap();
        assert_eq!(parsed.headers, ASSET_FIELDS);
        let qty = ASSET_FIELDS.iter().position(|f| *f == "qty").unwrap();
        let cost = ASSET_FIELDS.iter().position(|f| *f == "purchase_cost").unwrap();
        assert_eq!(parsed.rows[0][qty], "");
        assert_eq!(parsed.rows[1][qty], "5");
        assert_eq!(parsed.rows[1][cost], "12.50");
    }

    #[test]
    fn test_export_appends_fields_outside_schema() {
        let store = MemoryStore::new().with_records(
            EntityKind::Employee,
            vec![
                Record::new().with("email", "jane@example.com").with("name", "Jane"),
                Record::new()
                    .with("name", "Sam")
                    .with("email", "sam@example.com")
                    .with("badge", 7),
            ],
        );
        let mut sink = MemorySink::new();

        export_records(&store, &mut sink, EntityKind::Employee, "employees").unwrap();

        let parsed = parse_csv(sink.last().unwrap().1).unwrap();
        let mut expected: Vec<&str> = EMPLOYEE_FIELDS.to_vec();
        expected.push("badge");
        assert_eq!(parsed.headers, expected);
        assert_eq!(parsed.rows[0][0], "Jane");
        assert_eq!(parsed.rows[0][1], "jane@example.com");
        assert_eq!(parsed.rows[0][6], "");
        assert_eq!(parsed.rows[1][6], "7");
    }

    #[test]
    fn test_export_records_empty_store() {
        let store = MemoryStore::new();
        let mut sink = MemorySink::new();

        let outcome =
            export_records(&store, &mut sink, EntityKind::Employee, "employees").unwrap();

        assert_eq!(outcome.record_count, 0);
        assert_eq!(sink.last().unwrap().1, "");
    }
}
