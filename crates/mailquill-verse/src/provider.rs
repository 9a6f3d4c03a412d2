//! Verse and quote resolution.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use mailquill_store::{StorageBackend, StoreError};

use crate::corpus::{self, daily_index, Quote, Translation, Verse, CORPUS_KEYS, QUOTES};
use crate::fetch::VerseApi;
use crate::presets;

const CUSTOM_VERSES_KEY: &str = "mailquill.custom_verses";
const VERSE_CACHE_KEY: &str = "mailquill.verse_cache";

static VERSE_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{verse:([^}]+)\}\}").unwrap());

/// A remote-fetch result held in the local cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedVerse {
    pub text: String,
    pub reference: String,
    pub version: String,
    pub fetched_at: DateTime<Utc>,
}

impl CachedVerse {
    fn verse(&self) -> Verse {
        Verse {
            text: self.text.clone(),
            reference: self.reference.clone(),
            version: self.version.clone(),
        }
    }
}

/// Summary of the remote-fetch cache.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub count: usize,
    pub entries: Vec<(String, CachedVerse)>,
}

/// Verse and quote provider.
///
/// Verses resolve through an ordered fallback chain; a remote failure is
/// absorbed and surfaces only as a degradation label on the result's
/// `version` field. Quotes never touch the network.
pub struct VerseQuoteProvider {
    store: Arc<dyn StorageBackend>,
    api: VerseApi,
    translation: Translation,
}

impl VerseQuoteProvider {
    /// Create a provider over the local store with the configured
    /// translation preference.
    pub fn new(store: Arc<dyn StorageBackend>, translation: Translation) -> Self {
        Self {
            store,
            api: VerseApi::new(),
            translation,
        }
    }

    /// Create a provider with a custom fetch client (tests point it at a
    /// mock server).
    pub fn with_api(
        store: Arc<dyn StorageBackend>,
        api: VerseApi,
        translation: Translation,
    ) -> Self {
        Self {
            store,
            api,
            translation,
        }
    }

    pub fn translation(&self) -> Translation {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Translation) {
        self.translation = translation;
    }

    /// Resolve `key` in the requested translation.
    ///
    /// Resolution order, first match wins: user-imported custom verse,
    /// bundled preset, cached fetch result, live fetch, cached result under
    /// any other translation (labeled `"(cached)"`), static default entry
    /// (labeled `"(offline)"`). Returns `None` only for keys outside the
    /// static corpus.
    pub async fn resolve(&self, key: &str, translation: Translation) -> Option<Verse> {
        let fallback = presets::default_verse(key)?;

        let custom = self.custom_verses().await;
        if let Some(verse) = custom.get(key) {
            if verse.version == translation.as_str() {
                debug!("Using custom verse for {}", key);
                return Some(verse.clone());
            }
        }

        if let Some(verse) = presets::preset_verse(translation, key) {
            return Some(verse);
        }

        let cache_key = format!("{}_{}", key, translation.as_str());
        let cache = self.cache_map().await;
        if let Some(cached) = cache.get(&cache_key) {
            debug!("Using cached verse {}", cache_key);
            return Some(cached.verse());
        }

        let reference = corpus::display_reference(key)?;
        match self.api.fetch_text(reference, translation.api_code()).await {
            Ok(text) => {
                let verse = Verse {
                    text,
                    reference: fallback.reference.clone(),
                    version: translation.as_str().to_string(),
                };
                self.store_in_cache(&cache_key, &verse).await;
                return Some(verse);
            }
            Err(e) => {
                warn!("Verse fetch failed for {}: {}", cache_key, e);
            }
        }

        let prefix = format!("{}_", key);
        if let Some(cached) = cache
            .iter()
            .find(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v)
        {
            let mut verse = cached.verse();
            verse.version = format!("{} (cached)", translation.as_str());
            return Some(verse);
        }

        let mut verse = fallback;
        verse.version = format!("{} (offline)", translation.as_str());
        Some(verse)
    }

    /// The verse rotated in for today's date, in the configured translation.
    pub async fn verse_of_the_day(&self) -> Option<Verse> {
        self.verse_of_the_day_on(Utc::now().date_naive()).await
    }

    /// Daily verse for an explicit date. Deterministic for a given date.
    pub async fn verse_of_the_day_on(&self, date: NaiveDate) -> Option<Verse> {
        let key = CORPUS_KEYS[daily_index(date, CORPUS_KEYS.len())];
        self.resolve(key, self.translation).await
    }

    /// The quote rotated in for today's date.
    pub fn quote_of_the_day(&self) -> Quote {
        self.quote_of_the_day_on(Utc::now().date_naive())
    }

    /// Daily quote for an explicit date.
    pub fn quote_of_the_day_on(&self, date: NaiveDate) -> Quote {
        QUOTES[daily_index(date, QUOTES.len())].clone()
    }

    /// A uniformly random quote from the static corpus.
    pub fn random_quote(&self) -> Quote {
        let index = rand::thread_rng().gen_range(0..QUOTES.len());
        QUOTES[index].clone()
    }

    /// Replace the dynamic placeholders in `text`.
    ///
    /// Handles `{{verse_of_the_day}}`, `{{quote_of_the_day}}`,
    /// `{{random_quote}}` and `{{verse:KEY}}`. A `{{verse:KEY}}` whose key
    /// is outside the static corpus stays literal.
    pub async fn process_special_placeholders(&self, text: &str) -> String {
        let mut result = text.to_string();

        if result.contains("{{verse_of_the_day}}") {
            if let Some(verse) = self.verse_of_the_day().await {
                result = result.replace("{{verse_of_the_day}}", &format_verse(&verse));
            }
        }

        if result.contains("{{quote_of_the_day}}") {
            result = result.replace(
                "{{quote_of_the_day}}",
                &format_quote(&self.quote_of_the_day()),
            );
        }

        if result.contains("{{random_quote}}") {
            result = result.replace("{{random_quote}}", &format_quote(&self.random_quote()));
        }

        VERSE_REF_RE
            .replace_all(&result, |caps: &Captures<'_>| {
                let key = caps[1].trim().to_lowercase();
                match presets::default_verse(&key) {
                    Some(verse) => format_verse(&verse),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// User-imported custom verses, keyed like the static corpus.
    pub async fn custom_verses(&self) -> HashMap<String, Verse> {
        self.read_map(CUSTOM_VERSES_KEY).await
    }

    /// Add or replace a single custom verse.
    pub async fn add_custom_verse(&self, key: &str, verse: Verse) -> Result<(), StoreError> {
        let mut custom = self.custom_verses().await;
        custom.insert(key.to_string(), verse);
        self.write_map(CUSTOM_VERSES_KEY, &custom).await
    }

    /// Remove a custom verse; `false` if the key was not present.
    pub async fn remove_custom_verse(&self, key: &str) -> Result<bool, StoreError> {
        let mut custom = self.custom_verses().await;
        let removed = custom.remove(key).is_some();
        if removed {
            self.write_map(CUSTOM_VERSES_KEY, &custom).await?;
        }
        Ok(removed)
    }

    /// Merge a serialized map of custom verses; returns how many entries
    /// the payload carried.
    pub async fn import_custom_json(&self, data: &str) -> Result<usize, StoreError> {
        let imported: HashMap<String, Verse> =
            serde_json::from_str(data).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let count = imported.len();
        let mut custom = self.custom_verses().await;
        custom.extend(imported);
        self.write_map(CUSTOM_VERSES_KEY, &custom).await?;

        debug!("Imported {} custom verses", count);
        Ok(count)
    }

    /// Full custom-verse map, pretty-printed.
    pub async fn export_custom_json(&self) -> Result<String, StoreError> {
        let custom = self.custom_verses().await;
        serde_json::to_string_pretty(&custom)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Summary of the remote-fetch cache.
    pub async fn cache_stats(&self) -> CacheStats {
        let cache = self.cache_map().await;
        let mut entries: Vec<(String, CachedVerse)> = cache.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        CacheStats {
            count: entries.len(),
            entries,
        }
    }

    /// Drop every cached fetch result.
    pub async fn clear_cache(&self) -> Result<(), StoreError> {
        self.write_map(VERSE_CACHE_KEY, &HashMap::<String, CachedVerse>::new())
            .await
    }

    async fn cache_map(&self) -> HashMap<String, CachedVerse> {
        self.read_map(VERSE_CACHE_KEY).await
    }

    async fn store_in_cache(&self, cache_key: &str, verse: &Verse) {
        let mut cache = self.cache_map().await;
        cache.insert(
            cache_key.to_string(),
            CachedVerse {
                text: verse.text.clone(),
                reference: verse.reference.clone(),
                version: verse.version.clone(),
                fetched_at: Utc::now(),
            },
        );
        // Failing to cache must not fail the resolution that produced it.
        if let Err(e) = self.write_map(VERSE_CACHE_KEY, &cache).await {
            warn!("Failed to cache verse {}: {}", cache_key, e);
        }
    }

    async fn read_map<T: serde::de::DeserializeOwned>(&self, key: &str) -> HashMap<String, T> {
        match self.store.get(key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Discarding unreadable map '{}': {}", key, e);
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Failed to read '{}': {}", key, e);
                HashMap::new()
            }
        }
    }

    async fn write_map<T: Serialize>(
        &self,
        key: &str,
        map: &HashMap<String, T>,
    ) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(map).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(key, value).await
    }
}

/// Render a verse for insertion into an email body.
pub fn format_verse(verse: &Verse) -> String {
    format!(
        "\"{}\"\n\u{2014} {} ({})",
        verse.text, verse.reference, verse.version
    )
}

/// Render a quote for insertion into an email body.
pub fn format_quote(quote: &Quote) -> String {
    format!("\"{}\"\n\u{2014} {}", quote.text, quote.author)
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
