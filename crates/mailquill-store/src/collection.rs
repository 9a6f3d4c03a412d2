//! Quota-guarded persistence of record collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::StorageBackend;
use crate::error::StoreError;

/// Serialized-size ceiling for a single persisted collection (5 MiB).
pub const MAX_COLLECTION_BYTES: usize = 5 * 1024 * 1024;

/// How an import payload is applied to an existing collection.
///
/// The dedup key is the record `name`, not its id: a payload record whose
/// name already exists in the collection is skipped, never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Append payload records whose names are not already present.
    MergeSkipDuplicateByName,
    /// Discard the existing collection and take the payload wholesale.
    ReplaceAll,
}

/// Snapshot of how much of the persistence ceiling a collection uses.
#[derive(Debug, Clone, Copy)]
pub struct StorageUsage {
    pub used: usize,
    pub limit: usize,
}

impl StorageUsage {
    pub fn percent_used(&self) -> u8 {
        ((self.used as f64 / self.limit as f64) * 100.0).round() as u8
    }

    pub fn is_near_limit(&self) -> bool {
        self.percent_used() > 80
    }

    pub fn is_at_limit(&self) -> bool {
        self.percent_used() > 95
    }
}

/// Measure the serialized size of `records` against the ceiling.
pub fn usage_of<T: Serialize>(records: &[T]) -> Result<StorageUsage, StoreError> {
    let used = serde_json::to_string(records)
        .map_err(|e| StoreError::Serialization(e.to_string()))?
        .len();
    Ok(StorageUsage {
        used,
        limit: MAX_COLLECTION_BYTES,
    })
}

/// Load a record collection stored under `key`.
///
/// An absent key yields an empty collection. A stored blob that no longer
/// deserializes is treated as absent rather than poisoning startup.
pub async fn load_collection<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let Some(value) = backend.get(key).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_value(value) {
        Ok(records) => Ok(records),
        Err(e) => {
            warn!("Discarding unreadable collection '{}': {}", key, e);
            Ok(Vec::new())
        }
    }
}

/// Persist a record collection under `key`.
///
/// The serialized size is checked against [`MAX_COLLECTION_BYTES`] before
/// the backend write; on overflow the write is refused with
/// [`StoreError::QuotaExceeded`] and the backend is not touched.
pub async fn save_collection<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    records: &[T],
) -> Result<(), StoreError> {
    let serialized = serde_json::to_string(records)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let size = serialized.len();
    if size > MAX_COLLECTION_BYTES {
        warn!(
            "Refusing to persist '{}': {} bytes exceeds the {} byte ceiling",
            key, size, MAX_COLLECTION_BYTES
        );
        return Err(StoreError::QuotaExceeded {
            size,
            limit: MAX_COLLECTION_BYTES,
        });
    }

    let value = serde_json::from_str(&serialized)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    backend.set(key, value).await?;

    debug!("Persisted '{}' ({} bytes)", key, size);
    Ok(())
}
