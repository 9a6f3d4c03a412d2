//! # Mailquill Store
//!
//! Key-value persistence layer for the mailquill managers.
//!
//! ## Components
//!
//! - [`StorageBackend`] - Asynchronous key-value contract (absent key is
//!   `Ok(None)`, never an error)
//! - [`MemoryBackend`] / [`FileBackend`] - In-memory and file-backed stores
//! - [`load_collection`] / [`save_collection`] - Record-collection
//!   persistence with a fixed serialized-size ceiling
//! - [`ImportStrategy`] - Named import semantics shared by every manager
//!
//! An application holds two backend instances: a small synced namespace for
//! the settings blob and a device-local namespace for bulk record
//! collections.

pub mod backend;
pub mod collection;
pub mod error;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use collection::{
    load_collection, save_collection, usage_of, ImportStrategy, StorageUsage,
    MAX_COLLECTION_BYTES,
};
pub use error::StoreError;
