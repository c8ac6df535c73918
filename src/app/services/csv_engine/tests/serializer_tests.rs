//! Tests for CSV serialization and download naming

use super::super::reader::parse_csv;
use super::super::serializer::{
    download_filename, escape_field, needs_quoting, serialize, trigger_download,
};
use super::sample_asset_record;
use crate::app::adapters::MemorySink;
use crate::app::models::{FieldValue, Record};
use chrono::NaiveDate;

#[test]
fn test_serialize_empty_input() {
    assert_eq!(serialize(&[]), "");
}

#[test]
fn test_serialize_header_from_first_record() {
    let record = Record::new().with("a", 1).with("b", 2);
    assert_eq!(serialize(&[record]), "a,b\n1,2");
}

#[test]
fn test_serialize_multiple_records() {
    let records = vec![
        sample_asset_record(),
        sample_asset_record()
            .with("tag", "ASSET-0043")
            .with("purchase_cost", FieldValue::Null),
    ];

    let csv = serialize(&records);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "name,tag,category,status,qty,purchase_cost");
    assert_eq!(lines[1], "Dell XPS 13,ASSET-0042,Laptops,deployed,1,1249.5");
    assert_eq!(lines[2], "Dell XPS 13,ASSET-0043,Laptops,deployed,1,");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn test_needs_quoting_rule() {
    assert!(!needs_quoting("plain value"));
    assert!(!needs_quoting(""));
    assert!(needs_quoting("a,b"));
    assert!(needs_quoting("say \"hi\""));
    assert!(needs_quoting("line\nbreak"));
    assert!(needs_quoting("carriage\rreturn"));
    assert!(needs_quoting("Café"));
    assert!(needs_quoting("東京"));
}

#[test]
fn test_escape_field_doubles_quotes() {
    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("6\" ruler"), "\"6\"\" ruler\"");
    assert_eq!(escape_field("Café"), "\"Café\"");
}

#[test]
fn test_serialize_null_renders_empty() {
    let record = Record::new()
        .with("name", "Monitor")
        .with("notes", FieldValue::Null);
    assert_eq!(serialize(&[record]), "name,notes\nMonitor,");
}

#[test]
fn test_serialize_heterogeneous_records() {
    let records = vec![
        Record::new().with("a", "1").with("b", "2"),
        Record::new().with("a", "3"),
        Record::new().with("b", "4").with("c", "dropped").with("a", "5"),
    ];

    assert_eq!(serialize(&records), "a,b\n1,2\n3,\n5,4");
}

#[test]
fn test_round_trip_through_reader() {
    let tricky = [
        "comma, separated",
        "she said \"hello\"",
        "multi\nline\nnotes",
        "naïve café",
        "\"leading quote",
        "trailing quote\"",
        "  padded  ",
        "crlf\r\ninside",
    ];

    let records: Vec<Record> = tricky
        .iter()
        .enumerate()
        .map(|(i, value)| Record::new().with("id", i as i64).with("value", *value))
        .collect();

    let parsed = parse_csv(&serialize(&records)).unwrap();

    assert_eq!(parsed.headers, vec!["id", "value"]);
    assert_eq!(parsed.rows.len(), tricky.len());
    for (i, value) in tricky.iter().enumerate() {
        assert_eq!(parsed.rows[i][0], i.to_string());
        assert_eq!(parsed.rows[i][1], *value);
    }
}

#[test]
fn test_download_filename_format() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(download_filename("assets", date), "assets-2024-03-07.csv");
    assert_eq!(
        download_filename("asset-import-template", date),
        "asset-import-template-2024-03-07.csv"
    );
}

#[test]
fn test_trigger_download_uses_dated_name() {
    let mut sink = MemorySink::new();
    let csv = serialize(&[sample_asset_record()]);

    let location = trigger_download(&mut sink, &csv, "assets").unwrap();

    let (name, contents) = sink.last().unwrap();
    assert_eq!(location.to_string_lossy(), name);
    assert!(name.starts_with("assets-"));
    assert!(name.ends_with(".csv"));
    // assets-YYYY-MM-DD.csv
    assert_eq!(name.len(), "assets-".len() + 10 + ".csv".len());
    assert_eq!(contents, csv);
}
