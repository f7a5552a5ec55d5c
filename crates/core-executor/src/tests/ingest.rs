#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::ExecutionError;
use crate::ingest::{Direction, REDACTED};
use crate::memory::MemoryStore;
use crate::service::QueryExecutor;
use std::sync::Arc;

fn executor(store: &MemoryStore) -> QueryExecutor {
    QueryExecutor::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn test_log_message_inserts_redacted_record() {
    let store = MemoryStore::new();
    let executor = executor(&store);
    executor
        .log_message(true, r#"{"op":2,"d":{"token":"secret"}}"#)
        .await
        .expect("Failed to log message");
    executor
        .log_message(false, r#"{"op":0,"s":1,"t":"READY","d":{"session_id":"abc"}}"#)
        .await
        .expect("Failed to log message");

    let inserted = store.inserted();
    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[0].dir, Direction::Send);
    assert_eq!(inserted[0].raw, format!(r#"{{"op":2,"d":{{"token":"{REDACTED}"}}}}"#));
    assert_eq!(inserted[1].dir, Direction::Receive);
    assert_eq!(inserted[1].t.as_deref(), Some("READY"));
    assert!(!inserted[1].raw.contains("abc"));
    assert_eq!(store.opened(), 2);
    assert_eq!(store.closed(), 2);
}

#[tokio::test]
async fn test_log_message_rejects_undecodable_frame() {
    let store = MemoryStore::new();
    let err = executor(&store)
        .log_message(false, "not json")
        .await
        .expect_err("Expected decode error");
    assert!(matches!(err, ExecutionError::Message { .. }));
    assert!(store.inserted().is_empty());
    assert_eq!(store.opened(), 0);
}

#[tokio::test]
async fn test_insert_failure_releases_connection() {
    let store = MemoryStore::new().with_insert_error("Table 'wslog.message' doesn't exist");
    let err = executor(&store)
        .log_message(false, r#"{"op":11,"d":null}"#)
        .await
        .expect_err("Expected insert error");
    assert_eq!(
        err.to_string(),
        "Failed to store message: Table 'wslog.message' doesn't exist"
    );
    assert_eq!(store.opened(), 1);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_log_message_unreachable_store() {
    let err = executor(&MemoryStore::unreachable("Connection refused"))
        .log_message(false, r#"{"op":11,"d":null}"#)
        .await
        .expect_err("Expected connection error");
    assert!(err.is_connection_failure());
}
