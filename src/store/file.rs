//! JSON-file key/value store.
//!
//! Keeps every key in one JSON object on disk, e.g. to persist favorites
//! between runs of a command-line inspector.

use crate::base::error::Result;
use crate::store::{KeyValueStore, StoreFuture};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Key/value store backed by a single JSON file.
///
/// A missing file reads as empty. Writes rewrite the whole file; writes
/// from this process are serialized, other processes are not coordinated.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&json)?)
    }
}

impl JsonFileStore {
    async fn read_key(&self, key: String) -> Result<Option<Value>> {
        let mut entries = self.load().await?;
        Ok(entries.remove(&key))
    }

    async fn write_key(&self, key: String, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key, value);
        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), "saved key/value file");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreFuture<'_, Option<Value>> {
        Box::pin(self.read_key(key.to_string()))
    }

    fn set(&self, key: &str, value: Value) -> StoreFuture<'_, ()> {
        Box::pin(self.write_key(key.to_string(), value))
    }
}
