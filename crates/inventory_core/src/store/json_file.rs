//! JSON file-backed inventory store.
//!
//! # Responsibility
//! - Read and overwrite a single pretty-printed JSON array of items.
//! - Create the empty document on first start.
//! - Give records stored without an `id` a durable one.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is renamed over the target, so
//!   readers see either the previous or the new document, never a prefix.
//! - Read failures are logged and degrade to an empty inventory.

use super::{check_encodable, InventoryStore, StoreError, StoreResult};
use crate::model::item::Item;
use log::{error, info, warn};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name used when no explicit data path is configured.
pub const DEFAULT_DATA_FILE_NAME: &str = "inventory.json";

/// Inventory store over one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates parent directories and an empty `[]` document when missing.
    ///
    /// An existing document is only rewritten when some records lack an
    /// `id` (see [`JsonFileStore::backfill_missing_ids`]).
    pub fn ensure_data_file(&self) -> StoreResult<()> {
        if self.path.exists() {
            return self.backfill_missing_ids().map(|_| ());
        }

        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
        self.write(&[])?;
        info!(
            "event=inventory_init module=store status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    /// Persists the ids assigned on read to records stored without one.
    ///
    /// Without this, every read of such a document invents new ids. Returns
    /// the number of records that received an id; unreadable or invalid
    /// documents are left as they are and report `0`.
    pub fn backfill_missing_ids(&self) -> StoreResult<usize> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Ok(0);
        };
        let Ok(records) = serde_json::from_str::<Vec<Value>>(&raw) else {
            return Ok(0);
        };
        let missing = records
            .iter()
            .filter(|record| record.get("id").map_or(true, Value::is_null))
            .count();
        if missing == 0 {
            return Ok(0);
        }
        let Ok(items) = serde_json::from_value::<Vec<Item>>(Value::Array(records)) else {
            return Ok(0);
        };

        self.write(&items)?;
        info!(
            "event=inventory_migrate module=store status=ok assigned_ids={} path={}",
            missing,
            self.path.display()
        );
        Ok(missing)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn replace_contents(&self, payload: &[u8]) -> StoreResult<()> {
        let mut staged =
            NamedTempFile::new_in(self.parent_dir()).map_err(|err| self.io_error(err))?;
        staged
            .write_all(payload)
            .map_err(|err| self.io_error(err))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl InventoryStore for JsonFileStore {
    fn read(&self) -> Vec<Item> {
        let started_at = Instant::now();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=inventory_read module=store status=ok items=0 reason=missing_file path={}",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=inventory_read module=store status=degraded items=0 reason=unreadable path={} error={}",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Item>>(&raw) {
            Ok(items) => {
                info!(
                    "event=inventory_read module=store status=ok items={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                items
            }
            Err(err) => {
                warn!(
                    "event=inventory_read module=store status=degraded items=0 reason=invalid_json path={} error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn write(&self, items: &[Item]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = check_encodable(items)
            .and_then(|()| serde_json::to_string_pretty(items).map_err(StoreError::from))
            .and_then(|payload| self.replace_contents(payload.as_bytes()));

        match &result {
            Ok(()) => info!(
                "event=inventory_write module=store status=ok items={} duration_ms={}",
                items.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=inventory_write module=store status=error items={} duration_ms={} error={}",
                items.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
