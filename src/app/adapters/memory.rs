//! In-memory sink and store, used for dry runs and tests

use super::{DownloadSink, RecordStore, UpsertSummary, upsert_into};
use crate::app::models::{EntityKind, Record};
use crate::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Sink that keeps every saved download in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the most recent download
    pub fn last(&self) -> Option<(&str, &str)> {
        self.saved
            .last()
            .map(|(name, contents)| (name.as_str(), contents.as_str()))
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, filename: &str, contents: &str) -> Result<PathBuf> {
        self.saved.push((filename.to_string(), contents.to_string()));
        Ok(PathBuf::from(filename))
    }
}

/// Store backed by a map of record lists
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<EntityKind, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records of one kind
    pub fn with_records(mut self, kind: EntityKind, records: Vec<Record>) -> Self {
        self.records.insert(kind, records);
        self
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.records.get(&kind).map_or(0, Vec::len)
    }
}

impl RecordStore for MemoryStore {
    fn fetch(&self, kind: EntityKind) -> Result<Vec<Record>> {
        Ok(self.records.get(&kind).cloned().unwrap_or_default())
    }

    fn upsert(&mut self, kind: EntityKind, records: Vec<Record>) -> Result<UpsertSummary> {
        upsert_into(self.records.entry(kind).or_default(), kind, records)
    }
}
