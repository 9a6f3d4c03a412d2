use super::*;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_backend_set_and_get() {
    let backend = MemoryBackend::new();

    backend
        .set("key1", json!({"a": 1}))
        .await
        .unwrap();

    let value = backend.get("key1").await.unwrap();
    assert_eq!(value, Some(json!({"a": 1})));
    assert_eq!(backend.write_count(), 1);
}

#[tokio::test]
async fn test_memory_backend_absent_key() {
    let backend = MemoryBackend::new();
    assert_eq!(backend.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_memory_backend_overwrite() {
    let backend = MemoryBackend::new();

    backend.set("key", json!(1)).await.unwrap();
    backend.set("key", json!(2)).await.unwrap();

    assert_eq!(backend.get("key").await.unwrap(), Some(json!(2)));
    assert_eq!(backend.write_count(), 2);
}

#[tokio::test]
async fn test_memory_backend_remove() {
    let backend = MemoryBackend::new();

    backend.set("key", json!("v")).await.unwrap();
    backend.remove("key").await.unwrap();

    assert_eq!(backend.get("key").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_backend_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path()).await.unwrap();

    backend
        .set("mailquill.templates", json!([{"name": "Greet"}]))
        .await
        .unwrap();

    let value = backend.get("mailquill.templates").await.unwrap();
    assert_eq!(value, Some(json!([{"name": "Greet"}])));
}

#[tokio::test]
async fn test_file_backend_absent_key() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path()).await.unwrap();

    assert_eq!(backend.get("nothing").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_backend_remove() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path()).await.unwrap();

    backend.set("key", json!(true)).await.unwrap();
    backend.remove("key").await.unwrap();

    assert_eq!(backend.get("key").await.unwrap(), None);

    // Removing an absent key is a no-op.
    backend.remove("key").await.unwrap();
}

#[tokio::test]
async fn test_file_backend_corrupt_file_resolves_to_none() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path()).await.unwrap();

    tokio::fs::write(temp_dir.path().join("bad.json"), "{not json")
        .await
        .unwrap();

    assert_eq!(backend.get("bad").await.unwrap(), None);
}

#[test]
fn test_sanitize_key() {
    assert_eq!(
        FileBackend::sanitize_key("mailquill.templates"),
        "mailquill.templates"
    );
    assert_eq!(FileBackend::sanitize_key("a/b:c"), "a_b_c");
}
