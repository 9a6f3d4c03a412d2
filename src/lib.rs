//! # Mailquill
//!
//! Client-side data layer for a webmail companion: email templates with
//! `{{variable}}` substitution, profile-based autofill, signature
//! management, and a daily verse/quote provider, over a key-value
//! persistence layer.
//!
//! There is no server and no CLI - this crate is consumed by a thin
//! presentation layer. The host page is an opaque sink behind the
//! [`HostSink`] trait: this crate's job ends at producing the final
//! substituted string.
//!
//! ## Wiring
//!
//! Construct the managers once at startup with injected storage backends
//! (a synced one for settings, a local one for bulk records), then hand
//! them to [`ComposeService`]:
//!
//! ```no_run
//! use std::sync::Arc;
//! use mailquill::{ComposeService, HostSink, TargetField, ComposeError};
//! use mailquill_core::{ProfileManager, SignatureManager, TemplateManager};
//! use mailquill_store::MemoryBackend;
//! use mailquill_verse::{Translation, VerseQuoteProvider};
//!
//! # struct Sink;
//! # #[async_trait::async_trait]
//! # impl HostSink for Sink {
//! #     async fn insert(&self, _: TargetField, _: &str) -> Result<(), ComposeError> { Ok(()) }
//! # }
//! # async fn wire() -> Result<(), ComposeError> {
//! let local = Arc::new(MemoryBackend::new());
//! let mut compose = ComposeService::new(
//!     TemplateManager::new(local.clone()),
//!     ProfileManager::new(local.clone()),
//!     SignatureManager::new(local.clone()),
//!     VerseQuoteProvider::new(local, Translation::Csb),
//!     Sink,
//! );
//! compose.init().await?;
//! # Ok(())
//! # }
//! ```

pub mod compose;

pub use compose::{ComposeError, ComposeService, HostSink, TargetField};

pub use mailquill_core::{
    CoreError, NewProfile, NewSignature, NewTemplate, Profile, ProfileManager, Settings,
    SettingsManager, Signature, SignatureManager, Template, TemplateManager, UserProfile,
};
pub use mailquill_store::{FileBackend, ImportStrategy, MemoryBackend, StorageBackend, StoreError};
pub use mailquill_verse::{Translation, Verse, VerseQuoteProvider};
