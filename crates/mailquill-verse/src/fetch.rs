//! HTTP client for the remote verse service.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

use crate::error::VerseError;

const DEFAULT_BASE_URL: &str = "https://bible-api.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Inline verse-number markers like `[3]` in fetched text.
static VERSE_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Client for the remote verse lookup service.
///
/// The service takes a human-readable reference in the URL path and a
/// translation code as a query parameter, and answers with a JSON body whose
/// `text` field holds the verse. Any non-success status or network error is
/// a fetch failure; the provider's fallback chain handles it.
pub struct VerseApi {
    client: reqwest::Client,
    base_url: String,
}

impl VerseApi {
    /// Create a client against the production service.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (tests point this at a
    /// local mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("Mailquill/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the text of `reference` in the given API translation code.
    pub async fn fetch_text(
        &self,
        reference: &str,
        api_code: &str,
    ) -> Result<String, VerseError> {
        let url = format!(
            "{}/{}?translation={}",
            self.base_url, reference, api_code
        );
        debug!("Fetching verse from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(VerseError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VerseError::MalformedBody(e.to_string()))?;

        let text = body["text"]
            .as_str()
            .ok_or_else(|| VerseError::MalformedBody("missing text field".to_string()))?;

        Ok(Self::clean_text(text))
    }

    /// Strip verse-number markers and collapse whitespace.
    fn clean_text(text: &str) -> String {
        let stripped = VERSE_MARKERS.replace_all(text, "");
        WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
    }
}

impl Default for VerseApi {
    fn default() -> Self {
        Self::new()
    }
}
