use crate::models::traits::key_value_store::KeyValueStore;
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Reads the collection stored under `key`. Missing, unreadable or corrupt data
/// yields `fallback`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, fallback: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored data, using default");
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Stored data is corrupt, using default");
            fallback
        }
    }
}

/// Replaces the whole collection stored under `key`.
pub fn save<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}
