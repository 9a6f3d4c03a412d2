//! Verse lookup errors.

use thiserror::Error;

/// Remote verse lookup error types.
///
/// These only travel between the fetch client and the provider's fallback
/// chain; [`crate::VerseQuoteProvider::resolve`] absorbs every variant.
#[derive(Debug, Error)]
pub enum VerseError {
    /// Network-level failure (connect, timeout).
    #[error("Verse fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("Verse service returned status {0}")]
    Status(u16),

    /// Response body did not contain verse text.
    #[error("Malformed verse response: {0}")]
    MalformedBody(String),
}
