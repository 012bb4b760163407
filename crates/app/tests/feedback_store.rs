//! Behavioural tests for `FeedbackStore` against the persistence port.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{memory_store, new_feedback, FlakyKvStore};
use feedback_app::store::{FeedbackStore, RequestStatus, StoreError, UpdateOutcome};
use feedback_core::feedback::{FeedbackDraft, FeedbackType, FeedbackUpdate, Priority};
use feedback_core::selection::Selection;
use feedback_core::types::FeedbackId;
use feedback_core::view::{project, TypeFilter, ViewQuery};
use feedback_db::repositories::FeedbackRepo;
use feedback_db::{KvStore, MemoryKvStore, StorageError, FEEDBACK_KEY};

// ---------------------------------------------------------------------------
// Test: create appends exactly one active record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_adds_one_active_record() {
    let (storage, store) = memory_store().await;
    store
        .create(new_feedback("first", FeedbackType::Bug, Priority::Low))
        .await
        .unwrap();

    let new = new_feedback("second", FeedbackType::Feature, Priority::High);
    let id = new.id.clone();
    let before = store.len().await;
    let created = store.create(new).await.unwrap();

    assert_eq!(store.len().await, before + 1);
    assert!(!created.archived);
    let fetched = store.get(&id).await.expect("record should be retrievable");
    assert_eq!(fetched, created);

    let persisted = FeedbackRepo::load(&storage).await.unwrap();
    assert_eq!(persisted, store.snapshot().await);
}

// ---------------------------------------------------------------------------
// Test: operations on unknown ids change nothing and succeed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_ids_are_noops() {
    let (_, store) = memory_store().await;
    store
        .create(new_feedback("kept", FeedbackType::Bug, Priority::Medium))
        .await
        .unwrap();
    let before = store.snapshot().await;
    let ghost = FeedbackId::from("does-not-exist");

    let update = FeedbackUpdate {
        id: ghost.clone(),
        title: "t".into(),
        message: "m".into(),
        feedback_type: FeedbackType::Other,
        priority: Some(Priority::High),
        archived: None,
    };
    assert_matches!(store.update(update).await, Ok(UpdateOutcome::NotFound));
    assert!(!store.delete(&ghost).await.unwrap());
    assert_eq!(store.archive_many(&[ghost.clone()]).await.unwrap(), 0);
    assert_eq!(store.unarchive_many(&[ghost]).await.unwrap(), 0);

    assert_eq!(store.snapshot().await, before);
    assert_eq!(store.status(), RequestStatus::Succeeded);
}

// ---------------------------------------------------------------------------
// Test: archiving twice equals archiving once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_archive_is_idempotent() {
    let (storage, store) = memory_store().await;
    let record = store
        .create(new_feedback("a", FeedbackType::Bug, Priority::Low))
        .await
        .unwrap();
    let ids = vec![record.id.clone()];

    store.archive_many(&ids).await.unwrap();
    let once = store.snapshot().await;
    store.archive_many(&ids).await.unwrap();

    assert_eq!(store.snapshot().await, once);
    assert!(once[0].archived);
    assert_eq!(FeedbackRepo::load(&storage).await.unwrap(), once);

    store.unarchive_many(&ids).await.unwrap();
    assert!(!store.get(&record.id).await.unwrap().archived);
}

// ---------------------------------------------------------------------------
// Test: persisted collection reloads equal by value
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_reload_round_trip() {
    let (storage, store) = memory_store().await;
    for (title, ty, prio) in [
        ("Login bug", FeedbackType::Bug, Priority::High),
        ("Export feature", FeedbackType::Feature, Priority::Low),
        ("Faster search", FeedbackType::Improvement, Priority::Medium),
    ] {
        store.create(new_feedback(title, ty, prio)).await.unwrap();
    }
    let first = store.snapshot().await[0].id.clone();
    store.archive_many(&[first]).await.unwrap();

    let reloaded = FeedbackStore::load(Arc::clone(&storage), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(reloaded.snapshot().await, store.snapshot().await);
}

// ---------------------------------------------------------------------------
// Test: update without archived keeps the prior archived flag
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_omitting_archived_preserves_it() {
    let (_, store) = memory_store().await;
    let record = store
        .create(
            FeedbackDraft::new("X", "body", FeedbackType::Bug, Some(Priority::High))
                .into_new(FeedbackId::generate())
                .unwrap(),
        )
        .await
        .unwrap();
    store.archive_many(&[record.id.clone()]).await.unwrap();

    let update = FeedbackDraft::new("X renamed", "body", FeedbackType::Bug, Some(Priority::High))
        .into_update(record.id.clone())
        .unwrap();
    let outcome = store.update(update).await.unwrap();

    let UpdateOutcome::Updated(updated) = outcome else {
        panic!("record should have been updated");
    };
    assert!(updated.archived);
    assert_eq!(updated.title, "X renamed");

    let explicit = FeedbackDraft::new("X renamed", "body", FeedbackType::Bug, Some(Priority::High))
        .into_update(record.id.clone())
        .unwrap()
        .with_archived(false);
    store.update(explicit).await.unwrap();
    assert!(!store.get(&record.id).await.unwrap().archived);
}

// ---------------------------------------------------------------------------
// Test: select-all over a filtered view drives the bulk archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_select_all_then_bulk_archive_touches_only_visible() {
    let (_, store) = memory_store().await;
    let types = [
        FeedbackType::Bug,
        FeedbackType::Feature,
        FeedbackType::Bug,
        FeedbackType::Feature,
        FeedbackType::Other,
    ];
    for (n, ty) in types.into_iter().enumerate() {
        store
            .create(new_feedback(&format!("item {n}"), ty, Priority::Medium))
            .await
            .unwrap();
    }

    let items = store.snapshot().await;
    let query = ViewQuery {
        type_filter: TypeFilter::Only(FeedbackType::Feature),
        ..Default::default()
    };
    let visible = project(&items, &query);
    assert_eq!(visible.len(), 2);

    let mut selection = Selection::new();
    selection.toggle_all(&visible);
    assert_eq!(selection.len(), 2);

    let archived = store.archive_many(&selection.take()).await.unwrap();
    assert_eq!(archived, 2);

    let after = store.snapshot().await;
    for record in &after {
        assert_eq!(record.archived, record.feedback_type == FeedbackType::Feature);
    }
}

// ---------------------------------------------------------------------------
// Test: a failed write leaves memory and storage untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_failed_write_rolls_back() {
    let storage = Arc::new(FlakyKvStore::new());
    let store = FeedbackStore::load(Arc::clone(&storage), Duration::ZERO)
        .await
        .unwrap();
    let record = store
        .create(new_feedback("stable", FeedbackType::Bug, Priority::Low))
        .await
        .unwrap();
    let before = store.snapshot().await;

    storage.fail_writes(true);

    let err = store
        .create(new_feedback("lost", FeedbackType::Bug, Priority::Low))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Persist(StorageError::Unavailable(_)));
    assert_matches!(store.status(), RequestStatus::Failed(ref msg) if msg.contains("quota"));

    assert!(store.archive_many(&[record.id.clone()]).await.is_err());
    assert!(store.delete(&record.id).await.is_err());

    assert_eq!(store.snapshot().await, before);
    assert_eq!(FeedbackRepo::load(&*storage).await.unwrap(), before);

    // Still usable once the backend recovers.
    storage.fail_writes(false);
    store.delete(&record.id).await.unwrap();
    assert!(store.is_empty().await);
    assert_eq!(store.status(), RequestStatus::Succeeded);
}

// ---------------------------------------------------------------------------
// Test: concurrent mutations do not lose each other's updates
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_concurrent_mutations_are_all_applied() {
    let storage = Arc::new(MemoryKvStore::new());
    let store = Arc::new(
        FeedbackStore::load(Arc::clone(&storage), Duration::from_millis(500))
            .await
            .unwrap(),
    );

    let handles: Vec<_> = (0..5)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create(new_feedback(&format!("n{n}"), FeedbackType::Bug, Priority::Low))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.len().await, 5);
    assert_eq!(FeedbackRepo::load(&storage).await.unwrap().len(), 5);
    assert_eq!(store.status(), RequestStatus::Succeeded);
}

// ---------------------------------------------------------------------------
// Test: saving for one record leaves other stored values byte-for-byte
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unrecognised_stored_values_survive_other_mutations() {
    let seeded = serde_json::json!([
        {"id": "a", "title": "Legacy", "message": "old", "type": "Question", "priority": "Urgent", "archived": false},
        {"id": "b", "title": "Other", "message": "new", "type": "Bug", "priority": "Low", "archived": false},
    ]);
    let storage = Arc::new(MemoryKvStore::with_entries([(FEEDBACK_KEY, seeded.to_string())]));
    let store = FeedbackStore::load(Arc::clone(&storage), Duration::ZERO)
        .await
        .unwrap();

    store.archive_many(&[FeedbackId::from("b")]).await.unwrap();

    let raw = storage.get(FEEDBACK_KEY).await.unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0], seeded[0]);
    assert_eq!(stored[1]["archived"], true);
}
