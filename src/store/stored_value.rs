//! A typed value mirrored from a key/value store.

use crate::base::error::Result;
use crate::store::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Local copy of one storage key.
///
/// Loaded once; reads are synchronous afterwards and every [`set`](Self::set)
/// writes through. A missing, `null`, or undecodable stored value leaves the
/// initial value in place.
pub struct StoredValue<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T> StoredValue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        initial: T,
    ) -> Result<Self> {
        let key = key.into();
        let value = match store.get(&key).await? {
            None | Some(serde_json::Value::Null) => initial,
            Some(raw) => match serde_json::from_value(raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "ignoring undecodable stored value");
                    initial
                }
            },
        };
        Ok(Self { store, key, value })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and persist it. The local copy is updated even if
    /// the write fails.
    pub async fn set(&mut self, value: T) -> Result<()> {
        self.value = value;
        let raw = serde_json::to_value(&self.value)?;
        self.store.set(&self.key, raw).await
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StoredValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
