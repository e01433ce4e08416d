#![forbid(unsafe_code)]

use std::path::PathBuf;
use tl_storage::{CreateTodoRequest, SqliteStore, StoreError};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("tl_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn create(store: &mut SqliteStore, title: &str) -> tl_storage::TodoRow {
    let (row, _) = store
        .create_todo(CreateTodoRequest {
            title: title.to_string(),
            description: None,
            due_date: None,
        })
        .expect("create todo");
    row
}

#[test]
fn every_mutation_appends_exactly_one_event() {
    let storage_dir = temp_dir("every_mutation_appends_exactly_one_event");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let a = create(&mut store, "a");
    let b = create(&mut store, "b");
    store.toggle_todo(&a.id).expect("toggle");
    store.reposition_todo(&b.id, 1).expect("reposition");
    store.delete_todo(&a.id).expect("delete");

    let events = store.events_since(None, 100).expect("events");
    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "todo.created",
            "todo.created",
            "todo.toggled",
            "todo.reordered",
            "todo.deleted",
        ]
    );

    let seqs: Vec<i64> = events.iter().map(|e| e.seq).collect();
    let mut sorted = seqs.clone();
    sorted.sort_unstable();
    assert_eq!(seqs, sorted, "feed must be ascending by seq");
}

#[test]
fn cursor_paging_never_skips_or_repeats() {
    let storage_dir = temp_dir("cursor_paging_never_skips_or_repeats");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    for i in 0..7 {
        create(&mut store, &format!("todo {i}"));
    }

    let mut cursor: Option<String> = None;
    let mut seen = Vec::new();
    loop {
        let page = store
            .events_since(cursor.as_deref(), 3)
            .expect("events page");
        if page.is_empty() {
            break;
        }
        cursor = page.last().map(|e| e.event_id());
        seen.extend(page.into_iter().map(|e| e.seq));
    }

    let all: Vec<i64> = store
        .events_since(None, 100)
        .expect("events")
        .into_iter()
        .map(|e| e.seq)
        .collect();
    assert_eq!(seen, all);
}

#[test]
fn reorder_event_carries_the_move_payload() {
    let storage_dir = temp_dir("reorder_event_carries_the_move_payload");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    for title in ["a", "b", "c", "d"] {
        create(&mut store, title);
    }
    let d = store.list_todos().expect("list")[3].clone();

    let (_, event) = store.reposition_todo(&d.id, 2).expect("reposition");
    assert_eq!(event.event_type, "todo.reordered");
    assert_eq!(event.todo_id.as_deref(), Some(d.id.as_str()));

    let payload: serde_json::Value =
        serde_json::from_str(&event.payload_json).expect("payload json");
    assert_eq!(payload.get("from").and_then(|v| v.as_i64()), Some(4));
    assert_eq!(payload.get("to").and_then(|v| v.as_i64()), Some(2));
    assert_eq!(payload.get("shifted").and_then(|v| v.as_i64()), Some(2));
}

#[test]
fn malformed_cursor_is_rejected() {
    let storage_dir = temp_dir("malformed_cursor_is_rejected");
    let store = SqliteStore::open(&storage_dir).expect("open store");

    // Anything but the exact evt_ + 16-digit shape is rejected, including
    // short and signed suffixes that would still parse as integers.
    for cursor in ["not-a-cursor", "evt_7", "evt_+000000000000005", "evt_00000000000000001"] {
        let err = store
            .events_since(Some(cursor), 10)
            .expect_err("malformed cursor must fail");
        assert!(matches!(err, StoreError::InvalidInput(_)), "accepted {cursor}");
    }
}

#[test]
fn oversized_limit_returns_everything() {
    let storage_dir = temp_dir("oversized_limit_returns_everything");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    for i in 0..3 {
        create(&mut store, &format!("todo {i}"));
    }

    // A limit past i64::MAX must clamp, not wrap into a negative LIMIT.
    let events = store.events_since(None, usize::MAX).expect("events");
    assert_eq!(events.len(), 3);
}
