//! # Mailquill Verse
//!
//! Verse and quote provider: deterministic daily selection over static
//! corpora, bundled translation presets, and an opportunistic remote lookup
//! with a cache fallback chain.
//!
//! ## Components
//!
//! - [`VerseQuoteProvider`] - Resolution chain (custom -> preset -> cache ->
//!   live fetch -> stale cache -> static default) and special-placeholder
//!   processing
//! - [`VerseApi`] - HTTP client for the remote verse service
//! - [`corpus`] / [`presets`] - Static verse and quote tables
//!
//! A remote failure never escapes [`VerseQuoteProvider::resolve`]; degraded
//! results are labeled in their `version` field instead.

pub mod corpus;
pub mod error;
pub mod fetch;
pub mod presets;
pub mod provider;

pub use corpus::{daily_index, Quote, Translation, Verse};
pub use error::VerseError;
pub use fetch::VerseApi;
pub use provider::{CacheStats, VerseQuoteProvider};
