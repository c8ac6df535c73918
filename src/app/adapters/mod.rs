//! Collaborators injected into the CSV pipeline
//!
//! The engine never touches the filesystem or the backend directly. Callers
//! pass a [`DownloadSink`] for exports and templates, and a [`RecordStore`]
//! for fetching records to export and persisting validated imports.

pub mod filesystem;
pub mod memory;

pub use filesystem::{FileSystemSink, JsonFileStore};
pub use memory::{MemorySink, MemoryStore};

use crate::app::models::{EntityKind, Record};
use crate::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Destination for generated CSV downloads
pub trait DownloadSink {
    /// Store `contents` under `filename` and report where it landed
    fn save(&mut self, filename: &str, contents: &str) -> Result<PathBuf>;
}

/// Backend holding asset and employee records
pub trait RecordStore {
    /// All records of a kind, in store order
    fn fetch(&self, kind: EntityKind) -> Result<Vec<Record>>;

    /// Insert new records and update existing ones, matched on the kind's key field
    fn upsert(&mut self, kind: EntityKind, records: Vec<Record>) -> Result<UpsertSummary>;
}

/// Counts reported by [`RecordStore::upsert`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl UpsertSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Shared upsert semantics for in-process stores
///
/// Incoming fields overlay the stored record, so columns missing from an
/// upload keep their stored values. Key comparison ignores ASCII case.
/// Every incoming key is checked before `existing` is touched.
pub(crate) fn upsert_into(
    existing: &mut Vec<Record>,
    kind: EntityKind,
    incoming: Vec<Record>,
) -> Result<UpsertSummary> {
    let key_field = kind.key_field();

    let keys = incoming
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record.text(key_field).ok_or_else(|| {
                Error::store(format!(
                    "{} record {} has no '{}' value",
                    kind,
                    index + 1,
                    key_field
                ))
            })
        })
        .collect::<Result<Vec<String>>>()?;

    let mut summary = UpsertSummary::default();
    for (key, record) in keys.into_iter().zip(incoming) {
        let position = existing.iter().position(|stored| {
            stored
                .text(key_field)
                .is_some_and(|stored_key| stored_key.eq_ignore_ascii_case(&key))
        });

        match position {
            Some(position) => {
                existing[position].merge(&record);
                summary.updated += 1;
            }
            None => {
                existing.push(record);
                summary.inserted += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FieldValue;

    #[test]
    fn test_upsert_into_inserts_and_updates() {
        let mut stored = vec![
            Record::new()
                .with("tag", "A-1")
                .with("name", "Old")
                .with("notes", "keep me"),
        ];

        let incoming = vec![
            Record::new().with("tag", "a-1").with("name", "New"),
            Record::new().with("tag", "A-2").with("name", "Second"),
        ];

        let summary = upsert_into(&mut stored, EntityKind::Asset, incoming).unwrap();

        assert_eq!(summary, UpsertSummary { inserted: 1, updated: 1 });
        assert_eq!(summary.total(), 2);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].get("name"), Some(&FieldValue::from("New")));
        assert_eq!(stored[0].get("notes"), Some(&FieldValue::from("keep me")));
    }

    #[test]
    fn test_upsert_into_requires_key() {
        let mut stored = Vec::new();
        let incoming = vec![Record::new().with("name", "No email")];

        let result = upsert_into(&mut stored, EntityKind::Employee, incoming);
        assert!(matches!(result, Err(Error::Store { .. })));
        assert!(stored.is_empty());
    }

    #[test]
    fn test_upsert_into_missing_key_leaves_store_untouched() {
        let mut stored = vec![Record::new().with("tag", "A-1").with("name", "Old")];
        let before = stored.clone();

        let incoming = vec![
            Record::new().with("tag", "A-1").with("name", "New"),
            Record::new().with("tag", "A-2").with("name", "Second"),
            Record::new().with("name", "No tag"),
        ];

        let result = upsert_into(&mut stored, EntityKind::Asset, incoming);

        match result {
            Err(Error::Store { message }) => assert!(message.contains("record 3")),
            other => panic!("expected store error, got {:?}", other),
        }
        assert_eq!(stored, before);
    }
}
