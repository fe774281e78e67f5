//! Persistence: append-only JSONL stores and the doctor directory.
//!
//! Both stores are line-per-record JSON files. Appends are serialized with a
//! mutex so concurrent requests never interleave lines; reads tolerate a
//! trailing corrupt line by skipping anything that does not parse.

pub mod doctors;
pub mod history;

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only JSONL store for one record type.
pub struct JsonlStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonlStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a JSON line. Opens, writes and flushes under the
    /// write lock so a record is fully on disk before the next one starts.
    pub fn append(&self, record: &T) -> Result<(), StoreError> {
        let line = serde_json::to_string(record)?;

        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        file.write_all(line.as_bytes()).map_err(|e| self.io_err(e))?;
        file.write_all(b"\n").map_err(|e| self.io_err(e))?;
        file.flush().map_err(|e| self.io_err(e))?;
        Ok(())
    }

    /// Read every parseable record. A store that does not exist yet reads as
    /// empty; lines that fail to parse are skipped, not fatal.
    pub fn read_all(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|e| self.io_err(e))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| self.io_err(e))?;
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping unreadable store line");
                }
            }
        }
        Ok(records)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
