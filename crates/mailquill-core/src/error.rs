//! Core data-layer errors.

use thiserror::Error;

use mailquill_store::StoreError;

/// Core error types.
///
/// Lookup misses are not errors - manager operations return
/// `Ok(None)`/`Ok(false)` sentinels for unknown ids and refused invariants,
/// so the presentation layer owns the messaging.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persistence failure. Quota overflow stays distinguishable through
    /// [`StoreError::is_quota_exceeded`].
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Import payload was not the expected shape; the existing collection
    /// is left untouched.
    #[error("Malformed import payload: {0}")]
    MalformedImport(String),
}

impl CoreError {
    /// Whether this failure is the storage quota ceiling.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CoreError::Store(e) if e.is_quota_exceeded())
    }
}
