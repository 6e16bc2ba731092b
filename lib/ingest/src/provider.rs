//! Pluggable sources of raw parcel records.
//!
//! The upstream county assessor API is unreliable, so the production path
//! reads a local JSON capture of it; tests use an in-memory fixture. Both
//! satisfy the same contract, and the pipeline is agnostic to which one it
//! was given.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use parcelmatch_core::{Error, Result};

/// One raw record as received from the source: an arbitrary mapping of
/// source field names to values, none of them guaranteed present or typed.
pub type RawRecord = Map<String, Value>;

/// A source of raw parcel records
pub trait RawRecordProvider: Send + Sync {
    /// Fetch every available raw record.
    ///
    /// # Errors
    /// [`Error::DataSourceUnavailable`] when the source is missing or
    /// corrupt. Callers degrade to an empty dataset rather than crash.
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>>;
}

/// Reads a JSON array of raw records from a local file
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RawRecordProvider for FileProvider {
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            Error::DataSourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let records: Vec<RawRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            Error::DataSourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        info!(
            "Loaded {} raw records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Serves a fixed set of records; the test fixture implementation
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    records: Vec<RawRecord>,
}

impl InMemoryProvider {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl RawRecordProvider for InMemoryProvider {
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
