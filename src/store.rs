//! Backing stores for collection records.
//!
//! A [`Repository`](crate::repository::Repository) is generic over one of
//! these. [`FileStore`] survives restarts, [`MemoryStore`] lives as long as
//! the process, and [`ReadOnly`] has no storage at all: repositories built
//! on it never mutate.

use crate::config;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Storage capability injected into a repository.
pub trait Store {
    /// `false` turns every mutation of the owning repository into a no-op.
    const WRITABLE: bool;

    /// Read the stored record, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored record.
    fn save(&mut self, record: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Keeps one record file per storage key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the record files.
    pub data_dir: PathBuf,
    key: String,
}

impl FileStore {
    /// Create a store for `key`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data directory.
    /// Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>, key: &str) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            data_dir: dir,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Location of the record file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.key))
    }

    /// Remove the record file, if any.
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Store for FileStore {
    const WRITABLE: bool = true;

    fn load(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Writes to a temp file in the same directory and renames it over the
    /// record, so an interrupted write never leaves a truncated record.
    fn save(&mut self, record: &str) -> Result<()> {
        let dest = self.path();
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(record.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&dest).map_err(|e| e.error)?;
        log::debug!("Saved collection record to {}", dest.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Writable in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            writes: 0,
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Number of saves performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for MemoryStore {
    const WRITABLE: bool = true;

    fn load(&self) -> Result<Option<String>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> Result<()> {
        self.record = Some(record.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReadOnly
// ---------------------------------------------------------------------------

/// No storage. Repositories over it are frozen after construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl Store for ReadOnly {
    const WRITABLE: bool = false;

    fn load(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&mut self, _record: &str) -> Result<()> {
        Ok(())
    }
}
