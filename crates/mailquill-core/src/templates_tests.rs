use super::*;
use crate::library::LibraryCategory;
use mailquill_store::MemoryBackend;

async fn manager() -> (TemplateManager, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = TemplateManager::new(backend.clone());
    manager.load().await.unwrap();
    (manager, backend)
}

fn greet() -> NewTemplate {
    NewTemplate {
        name: "Greet".to_string(),
        subject: "Hi {{name}}".to_string(),
        body: "Welcome, {{name}}! From {{sender}}".to_string(),
        category: "Work".to_string(),
    }
}

#[tokio::test]
async fn test_create_computes_variables_in_order() {
    let (mut manager, _) = manager().await;

    let template = manager.create(greet()).await.unwrap();

    assert_eq!(template.variables, vec!["name", "sender"]);
    assert_eq!(template.usage_count, 0);
    assert_eq!(template.created, template.modified);
}

#[tokio::test]
async fn test_create_defaults_name_and_category() {
    let (mut manager, _) = manager().await;

    let template = manager.create(NewTemplate::default()).await.unwrap();

    assert_eq!(template.name, "Untitled Template");
    assert_eq!(template.category, "Other");
}

#[tokio::test]
async fn test_update_recomputes_variables_from_result() {
    let (mut manager, _) = manager().await;
    let template = manager.create(greet()).await.unwrap();

    // Only the body changes; the subject's {{name}} must still count.
    let updated = manager
        .update(
            template.id,
            TemplateUpdate {
                body: Some("Regards, {{signoff}}".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.variables, vec!["name", "signoff"]);
    assert!(updated.modified >= template.modified);
    assert_eq!(updated.subject, "Hi {{name}}");
}

#[tokio::test]
async fn test_update_unknown_id_is_none() {
    let (mut manager, _) = manager().await;
    let result = manager
        .update(Uuid::new_v4(), TemplateUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_has_no_floor() {
    let (mut manager, _) = manager().await;
    let template = manager.create(greet()).await.unwrap();

    assert!(manager.delete(template.id).await.unwrap());
    assert!(manager.all().is_empty());

    // Double delete is a benign miss.
    assert!(!manager.delete(template.id).await.unwrap());
}

#[tokio::test]
async fn test_search_is_case_insensitive_or_match() {
    let (mut manager, _) = manager().await;
    manager.create(greet()).await.unwrap();
    manager
        .create(NewTemplate {
            name: "Invoice".to_string(),
            subject: "Payment due".to_string(),
            body: "Please pay".to_string(),
            category: "Sales".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(manager.search("WELCOME").len(), 1);
    assert_eq!(manager.search("sales").len(), 1);
    assert_eq!(manager.search("e").len(), 2);
    assert!(manager.search("nothing-here").is_empty());
}

#[tokio::test]
async fn test_filter_by_category() {
    let (mut manager, _) = manager().await;
    manager.create(greet()).await.unwrap();

    assert_eq!(manager.by_category("Work").len(), 1);
    assert!(manager.by_category("Personal").is_empty());
}

#[tokio::test]
async fn test_increment_usage_leaves_modified_untouched() {
    let (mut manager, _) = manager().await;
    let template = manager.create(greet()).await.unwrap();

    manager.increment_usage(template.id).await.unwrap();
    manager.increment_usage(template.id).await.unwrap();

    let stored = manager.get(template.id).unwrap();
    assert_eq!(stored.usage_count, 2);
    assert_eq!(stored.modified, template.modified);

    // Unknown id is a no-op.
    manager.increment_usage(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_most_used_orders_by_usage() {
    let (mut manager, _) = manager().await;
    let a = manager.create(greet()).await.unwrap();
    let b = manager
        .create(NewTemplate {
            name: "Second".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    manager.increment_usage(b.id).await.unwrap();
    manager.increment_usage(b.id).await.unwrap();
    manager.increment_usage(a.id).await.unwrap();

    let top = manager.most_used(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, b.id);
}

#[tokio::test]
async fn test_duplicate_gets_fresh_identity() {
    let (mut manager, _) = manager().await;
    let original = manager.create(greet()).await.unwrap();
    manager.increment_usage(original.id).await.unwrap();

    let copy = manager.duplicate(original.id).await.unwrap().unwrap();

    assert_eq!(copy.name, "Greet (Copy)");
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.usage_count, 0);
    assert_eq!(copy.variables, original.variables);
    assert_eq!(manager.all().len(), 2);
}

#[tokio::test]
async fn test_categories_registration() {
    let (mut manager, _) = manager().await;

    assert!(manager.categories().contains(&"Follow-up".to_string()));
    assert!(manager.add_category("Newsletters".to_string()));
    assert!(!manager.add_category("Newsletters".to_string()));

    // Creating with a novel category registers it.
    manager
        .create(NewTemplate {
            category: "Legal".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(manager.categories().contains(&"Legal".to_string()));
}

#[tokio::test]
async fn test_import_prebuilt_dedups_by_name() {
    let (mut manager, _) = manager().await;

    let work = LibrarySelection::Category(LibraryCategory::Work);
    let first = manager.import_prebuilt(work).await.unwrap();
    assert!(first > 0);
    assert_eq!(manager.all().len(), first);

    // A second import of the same category adds nothing.
    assert_eq!(manager.import_prebuilt(work).await.unwrap(), 0);
    assert_eq!(manager.all().len(), first);

    // Importing everything adds only the other categories.
    let rest = manager.import_prebuilt(LibrarySelection::All).await.unwrap();
    assert_eq!(manager.all().len(), first + rest);
}

#[tokio::test]
async fn test_import_json_merge_skips_existing_names() {
    let (mut manager, _) = manager().await;
    let existing = manager
        .create(NewTemplate {
            name: "Existing".to_string(),
            subject: "original subject".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let payload = serde_json::json!([
        {"name": "Existing", "subject": "hijacked"},
        {"name": "NewOne", "subject": "Hello {{name}}"}
    ])
    .to_string();

    let added = manager
        .import_json(&payload, ImportStrategy::MergeSkipDuplicateByName)
        .await
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(manager.all().len(), 2);

    // The matched record is untouched, including its modified timestamp.
    let kept = manager.get(existing.id).unwrap();
    assert_eq!(kept.subject, "original subject");
    assert_eq!(kept.modified, existing.modified);

    // The added record got fresh identity and recomputed variables.
    let imported = manager.search("NewOne")[0];
    assert_eq!(imported.variables, vec!["name"]);
}

#[tokio::test]
async fn test_import_json_replace_normalizes_records() {
    let (mut manager, _) = manager().await;
    manager.create(greet()).await.unwrap();

    let payload = serde_json::json!([
        {"name": "Only", "body": "{{a}} {{b}}", "variables": ["stale", "junk"]}
    ])
    .to_string();

    let count = manager
        .import_json(&payload, ImportStrategy::ReplaceAll)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(manager.all().len(), 1);

    // Payload variables are never trusted.
    assert_eq!(manager.all()[0].variables, vec!["a", "b"]);
}

#[tokio::test]
async fn test_import_json_malformed_leaves_collection_untouched() {
    let (mut manager, _) = manager().await;
    manager.create(greet()).await.unwrap();

    let err = manager
        .import_json("{\"not\": \"an array\"}", ImportStrategy::ReplaceAll)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::MalformedImport(_)));
    assert_eq!(manager.all().len(), 1);
}

#[tokio::test]
async fn test_export_round_trips_through_import() {
    let (mut original, _) = manager().await;
    original.create(greet()).await.unwrap();
    let exported = original.export_json().unwrap();

    let (mut fresh, _) = manager().await;
    let count = fresh
        .import_json(&exported, ImportStrategy::ReplaceAll)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(fresh.all()[0].name, "Greet");
    assert_eq!(fresh.all()[0].variables, vec!["name", "sender"]);
}

#[tokio::test]
async fn test_quota_guard_blocks_backend_write() {
    let (mut manager, backend) = manager().await;
    let writes_before = backend.write_count();

    let big = "x".repeat(2 * 1024 * 1024);
    manager.create(greet()).await.unwrap();

    // Three 2 MiB bodies exceed the 5 MiB ceiling.
    let mut err = None;
    for i in 0..3 {
        let result = manager
            .create(NewTemplate {
                name: format!("big-{i}"),
                body: big.clone(),
                ..Default::default()
            })
            .await;
        if let Err(e) = result {
            err = Some(e);
            break;
        }
    }

    let err = err.expect("quota should have been exceeded");
    assert!(err.is_quota_exceeded());

    // The oversized write never reached the backend: the successful creates
    // each wrote once, the refused one did not.
    assert_eq!(backend.write_count() - writes_before, 3);
}

#[tokio::test]
async fn test_stats() {
    let (mut manager, _) = manager().await;
    let a = manager.create(greet()).await.unwrap();
    manager
        .create(NewTemplate {
            name: "Plain".to_string(),
            body: "no variables".to_string(),
            category: "Personal".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    manager.increment_usage(a.id).await.unwrap();

    let stats = manager.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_category["Work"], 1);
    assert_eq!(stats.by_category["Personal"], 1);
    assert_eq!(stats.with_variables, 1);
    assert_eq!(stats.total_variables, 2);
    assert_eq!(stats.total_usage, 1);
}

#[tokio::test]
async fn test_load_restores_persisted_state() {
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = TemplateManager::new(backend.clone());
    manager.load().await.unwrap();
    let created = manager.create(greet()).await.unwrap();

    let mut reloaded = TemplateManager::new(backend);
    reloaded.load().await.unwrap();

    assert_eq!(reloaded.all().len(), 1);
    assert_eq!(reloaded.get(created.id).unwrap().name, "Greet");
}
