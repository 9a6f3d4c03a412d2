use super::*;
use mailquill_store::MemoryBackend;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(translation: Translation) -> VerseQuoteProvider {
    VerseQuoteProvider::new(Arc::new(MemoryBackend::new()), translation)
}

/// Provider whose fetch client points at a dead port, so any network tier
/// fails immediately.
fn offline_provider(translation: Translation) -> VerseQuoteProvider {
    VerseQuoteProvider::with_api(
        Arc::new(MemoryBackend::new()),
        VerseApi::with_base_url("http://127.0.0.1:9"),
        translation,
    )
}

#[tokio::test]
async fn test_resolve_prefers_custom_verse() {
    let provider = offline_provider(Translation::Niv);
    provider
        .add_custom_verse(
            "john-3:16",
            Verse {
                text: "custom text".to_string(),
                reference: "John 3:16".to_string(),
                version: "NIV".to_string(),
            },
        )
        .await
        .unwrap();

    let verse = provider.resolve("john-3:16", Translation::Niv).await.unwrap();
    assert_eq!(verse.text, "custom text");
    assert_eq!(verse.version, "NIV");
}

#[tokio::test]
async fn test_custom_verse_with_other_translation_is_skipped() {
    // Custom entry stored under NKJV must not satisfy an ESV request; the
    // bundled ESV preset wins instead.
    let provider = offline_provider(Translation::Esv);
    provider
        .add_custom_verse(
            "john-3:16",
            Verse {
                text: "custom text".to_string(),
                reference: "John 3:16".to_string(),
                version: "NKJV".to_string(),
            },
        )
        .await
        .unwrap();

    let verse = provider.resolve("john-3:16", Translation::Esv).await.unwrap();
    assert_eq!(verse.version, "ESV");
    assert_ne!(verse.text, "custom text");
}

#[tokio::test]
async fn test_resolve_bundled_preset_never_fetches() {
    let provider = offline_provider(Translation::Esv);

    let verse = provider.resolve("ps-23:1", Translation::Esv).await.unwrap();
    assert_eq!(verse.version, "ESV");
    assert_eq!(verse.reference, "Psalm 23:1");
}

#[tokio::test]
async fn test_resolve_live_fetch_populates_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("translation", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "[16] For God so loved the world"
        })))
        .mount(&server)
        .await;

    let provider = VerseQuoteProvider::with_api(
        Arc::new(MemoryBackend::new()),
        VerseApi::with_base_url(server.uri()),
        Translation::Niv,
    );

    let verse = provider.resolve("john-3:16", Translation::Niv).await.unwrap();
    assert_eq!(verse.text, "For God so loved the world");
    assert_eq!(verse.version, "NIV");

    let stats = provider.cache_stats().await;
    assert_eq!(stats.count, 1);
    assert_eq!(stats.entries[0].0, "john-3:16_NIV");
}

#[tokio::test]
async fn test_resolve_uses_cache_before_fetching() {
    // Seed the cache, then resolve against a dead server: the cached entry
    // must be served without any fetch attempt succeeding.
    let store = Arc::new(MemoryBackend::new());
    let warm = VerseQuoteProvider::with_api(
        store.clone(),
        VerseApi::with_base_url("http://127.0.0.1:9"),
        Translation::Niv,
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "fetched once"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetching = VerseQuoteProvider::with_api(
        store.clone(),
        VerseApi::with_base_url(server.uri()),
        Translation::Niv,
    );
    fetching.resolve("john-3:16", Translation::Niv).await.unwrap();

    let verse = warm.resolve("john-3:16", Translation::Niv).await.unwrap();
    assert_eq!(verse.text, "fetched once");
    assert_eq!(verse.version, "NIV");
}

#[tokio::test]
async fn test_fetch_failure_falls_back_to_stale_cache() {
    let store = Arc::new(MemoryBackend::new());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "king james text"
        })))
        .mount(&server)
        .await;

    // Warm the cache under KJV, then request NIV with the network down.
    let warm = VerseQuoteProvider::with_api(
        store.clone(),
        VerseApi::with_base_url(server.uri()),
        Translation::Kjv,
    );
    warm.resolve("john-3:16", Translation::Kjv).await.unwrap();

    let offline = VerseQuoteProvider::with_api(
        store.clone(),
        VerseApi::with_base_url("http://127.0.0.1:9"),
        Translation::Niv,
    );
    let verse = offline.resolve("john-3:16", Translation::Niv).await.unwrap();

    assert_eq!(verse.text, "king james text");
    assert_eq!(verse.version, "NIV (cached)");
}

#[tokio::test]
async fn test_fetch_failure_without_cache_serves_offline_default() {
    let provider = offline_provider(Translation::Niv);

    let verse = provider.resolve("john-3:16", Translation::Niv).await.unwrap();
    assert_eq!(verse.version, "NIV (offline)");
    assert_eq!(verse.reference, "John 3:16");
    assert!(verse.text.contains("For God so loved the world"));
}

#[tokio::test]
async fn test_resolve_unknown_key_is_none() {
    let provider = offline_provider(Translation::Nkjv);
    assert!(provider.resolve("gen-1:1", Translation::Nkjv).await.is_none());
}

#[tokio::test]
async fn test_verse_of_the_day_is_deterministic() {
    let provider = offline_provider(Translation::Nkjv);
    let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();

    let first = provider.verse_of_the_day_on(date).await.unwrap();
    let second = provider.verse_of_the_day_on(date).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_quote_of_the_day_is_deterministic() {
    let provider = provider(Translation::Nkjv);
    let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();

    assert_eq!(
        provider.quote_of_the_day_on(date),
        provider.quote_of_the_day_on(date)
    );
}

#[test]
fn test_random_quote_comes_from_corpus() {
    let provider = provider(Translation::Nkjv);
    let quote = provider.random_quote();
    assert!(QUOTES.contains(&quote));
}

#[tokio::test]
async fn test_process_special_placeholders() {
    let provider = offline_provider(Translation::Nkjv);
    let date_bound = "Quote: {{quote_of_the_day}}";

    let processed = provider.process_special_placeholders(date_bound).await;
    assert!(!processed.contains("{{quote_of_the_day}}"));
    assert!(processed.contains("\u{2014}"));
}

#[tokio::test]
async fn test_process_verse_of_the_day_placeholder() {
    // NKJV is bundled, so the daily verse resolves without the network.
    let provider = offline_provider(Translation::Nkjv);

    let processed = provider
        .process_special_placeholders("Sig\n{{verse_of_the_day}}")
        .await;
    assert!(!processed.contains("{{verse_of_the_day}}"));
    assert!(processed.contains("(NKJV)"));
}

#[tokio::test]
async fn test_process_verse_reference_placeholder() {
    let provider = offline_provider(Translation::Nkjv);

    let processed = provider
        .process_special_placeholders("{{verse:JOHN-3:16}} and {{verse:gen-1:1}}")
        .await;

    // Known key resolves (case-insensitively); unknown key stays literal.
    assert!(processed.contains("John 3:16"));
    assert!(processed.contains("{{verse:gen-1:1}}"));
}

#[tokio::test]
async fn test_custom_verse_import_and_removal() {
    let provider = provider(Translation::Nkjv);

    let payload = serde_json::json!({
        "john-3:16": {"text": "t", "reference": "John 3:16", "version": "NKJV"}
    })
    .to_string();

    assert_eq!(provider.import_custom_json(&payload).await.unwrap(), 1);
    assert_eq!(provider.custom_verses().await.len(), 1);

    assert!(provider.remove_custom_verse("john-3:16").await.unwrap());
    assert!(!provider.remove_custom_verse("john-3:16").await.unwrap());
    assert!(provider.custom_verses().await.is_empty());
}

#[tokio::test]
async fn test_import_custom_json_malformed() {
    let provider = provider(Translation::Nkjv);
    assert!(provider.import_custom_json("[1, 2]").await.is_err());
}

#[tokio::test]
async fn test_clear_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "t"})),
        )
        .mount(&server)
        .await;

    let provider = VerseQuoteProvider::with_api(
        Arc::new(MemoryBackend::new()),
        VerseApi::with_base_url(server.uri()),
        Translation::Niv,
    );

    provider.resolve("ps-23:1", Translation::Niv).await.unwrap();
    assert_eq!(provider.cache_stats().await.count, 1);

    provider.clear_cache().await.unwrap();
    assert_eq!(provider.cache_stats().await.count, 0);
}

#[test]
fn test_format_verse_and_quote() {
    let verse = Verse {
        text: "text".to_string(),
        reference: "John 3:16".to_string(),
        version: "ESV".to_string(),
    };
    assert_eq!(format_verse(&verse), "\"text\"\n\u{2014} John 3:16 (ESV)");

    let quote = Quote {
        text: "words".to_string(),
        author: "Someone".to_string(),
    };
    assert_eq!(format_quote(&quote), "\"words\"\n\u{2014} Someone");
}
