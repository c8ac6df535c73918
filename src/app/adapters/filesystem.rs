//! Filesystem-backed sink and JSON file store
//!
//! `FileSystemSink` writes downloads into a directory. `JsonFileStore` keeps
//! both record lists in a single JSON document and rewrites it atomically
//! (write to a sibling temp file, then rename) after every upsert.

use super::{DownloadSink, RecordStore, UpsertSummary, upsert_into};
use crate::app::models::{EntityKind, Record};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sink writing each download as a file in `dir`
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    dir: PathBuf,
}

impl FileSystemSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileSystemSink {
    fn save(&mut self, filename: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::io(
                format!("Failed to create output directory '{}'", self.dir.display()),
                e,
            )
        })?;

        let path = self.dir.join(filename);
        fs::write(&path, contents)
            .map_err(|e| Error::io(format!("Failed to write '{}'", path.display()), e))?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}

/// On-disk layout of the store document
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    assets: Vec<Record>,
    #[serde(default)]
    employees: Vec<Record>,
}

impl StoreDocument {
    fn list(&self, kind: EntityKind) -> &Vec<Record> {
        match kind {
            EntityKind::Asset => &self.assets,
            EntityKind::Employee => &self.employees,
        }
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<Record> {
        match kind {
            EntityKind::Asset => &mut self.assets,
            EntityKind::Employee => &mut self.employees,
        }
    }
}

/// Record store persisted as one JSON file
///
/// A missing file reads as an empty store; it is created on first upsert.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            debug!("Store {} does not exist yet", self.path.display());
            return Ok(StoreDocument::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::io(
                format!("Failed to read store '{}'", self.path.display()),
                e,
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(
                format!("Store '{}' is not a valid record document", self.path.display()),
                e,
            )
        })
    }

    fn persist(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create store directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| Error::serialization("Failed to encode store document", e))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| {
            Error::io(format!("Failed to write '{}'", temp_path.display()), e)
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::io(
                format!("Failed to replace store '{}'", self.path.display()),
                e,
            )
        })?;

        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn fetch(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let document = self.load()?;
        Ok(document.list(kind).clone())
    }

    fn upsert(&mut self, kind: EntityKind, records: Vec<Record>) -> Result<UpsertSummary> {
        let mut document = self.load()?;
        let summary = upsert_into(document.list_mut(kind), kind, records)?;
        self.persist(&document)?;

        info!(
            "Stored {} {} records in {} ({} new, {} updated)",
            summary.total(),
            kind,
            self.path.display(),
            summary.inserted,
            summary.updated
        );

        Ok(summary)
    }
}
