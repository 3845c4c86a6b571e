//! # CSV Well Store
//!
//! Append-only CSV store for harvested well records. The file starts with
//! the fixed thirty-column header and every record is one row appended
//! beneath it; rows are never rewritten or reordered. A single writer is
//! held open behind an async mutex so concurrent extractions append one at
//! a time, each flushed before the next begins.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::canonical_key::CanonicalKey;
use crate::domain::record::{FIELD_NAMES, WellRecord};

/// Errors raised while opening, reading or appending to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read store {path:?}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("failed to append to store {path:?}: {source}")]
    Append { path: PathBuf, source: csv::Error },
}

/// The append-only record store.
pub struct CsvWellStore {
    path: PathBuf,
    writer: Mutex<csv::Writer<std::fs::File>>,
}

impl CsvWellStore {
    /// Opens the store at `path`, creating the file with its header when it
    /// is absent or empty. Existing rows are left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let needs_header = match std::fs::metadata(&path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Open {
                path: path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            info!("Creating store with header: {:?}", path);
            writer
                .write_record(FIELD_NAMES)
                .and_then(|()| writer.flush().map_err(csv::Error::from))
                .map_err(|source| StoreError::Append {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    /// Reads every stored canonical key from the registration number column.
    pub fn load_known_keys(&self) -> Result<HashSet<CanonicalKey>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        let mut keys = HashSet::new();
        for row in reader.records() {
            let row = row.map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
            if let Some(key) = row.get(0) {
                keys.insert(CanonicalKey::from(key));
            }
        }
        debug!("Loaded {} known keys from {:?}", keys.len(), self.path);
        Ok(keys)
    }

    /// Appends one record and flushes it to disk before returning.
    pub async fn append(&self, record: &WellRecord) -> Result<(), StoreError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_record(record.values())
            .and_then(|()| writer.flush().map_err(csv::Error::from))
            .map_err(|source| StoreError::Append {
                path: self.path.clone(),
                source,
            })?;
        debug!("Appended record: {}", record.registration_no());
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
