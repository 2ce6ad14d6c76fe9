// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the file-backed prompt log

use std::sync::Arc;
use tempfile::TempDir;
use zorai_node::storage::{ChatEntry, ChatHistoryStore, PromptLogError};

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = ChatHistoryStore::new(dir.path().join("chatHistory.json"));

    assert!(store.read_all().await.is_empty());
}

#[tokio::test]
async fn test_append_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("chatHistory.json");
    let store = ChatHistoryStore::new(&path);

    store
        .append(ChatEntry::new("what is zorai?", "an image registry"))
        .await
        .unwrap();

    assert!(path.exists());
    let entries = store.read_all().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].prompt, "what is zorai?");
    assert_eq!(entries[0].response, "an image registry");
}

#[tokio::test]
async fn test_entries_keep_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = ChatHistoryStore::new(dir.path().join("chatHistory.json"));

    for i in 0..3 {
        store
            .append(ChatEntry::new(&format!("prompt {}", i), "ok"))
            .await
            .unwrap();
    }

    let prompts: Vec<String> = store.read_all().await.into_iter().map(|e| e.prompt).collect();
    assert_eq!(prompts, vec!["prompt 0", "prompt 1", "prompt 2"]);
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty_and_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatHistory.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = ChatHistoryStore::new(&path);

    assert!(store.read_all().await.is_empty());

    let err = store
        .append(ChatEntry::new("hello", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, PromptLogError::Corrupt { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_unreadable_log_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatHistory.json");
    std::fs::create_dir(&path).unwrap();
    let store = ChatHistoryStore::new(&path);

    let err = store
        .append(ChatEntry::new("hello", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, PromptLogError::Read(_)));
    assert!(path.is_dir());
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ChatHistoryStore::new(dir.path().join("chatHistory.json")));

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .append(ChatEntry::new(&format!("prompt {}", i), "ok"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.read_all().await.len(), 10);
}

#[test]
fn test_entry_serializes_with_timestamp() {
    let entry = ChatEntry::new("p", "r");
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["prompt"], "p");
    assert_eq!(json["response"], "r");
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(entry.id.parse::<i64>().is_ok());
}
