// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed database behavior across reopen.

use courier_core::{ConversationKey, Fingerprint, FingerprintStore, ThreadId, ThreadStore};
use courier_storage::{Database, MemoryThreadStore, SqliteFingerprintStore, SqliteThreadStore};

#[tokio::test]
async fn mappings_and_fingerprints_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("courier.db");
    let path = path.to_str().unwrap().to_string();
    let key = ConversationKey("77010000000".into());
    let fp = Fingerprint("0f".repeat(32));

    {
        let db = Database::open(&path).await.unwrap();
        SqliteThreadStore::new(db.clone())
            .put(&key, &ThreadId("thread_1".into()))
            .await
            .unwrap();
        assert!(SqliteFingerprintStore::new(db.clone()).insert(&fp).await.unwrap());
        db.checkpoint().await.unwrap();
    }

    let db = Database::open(&path).await.unwrap();
    assert_eq!(
        SqliteThreadStore::new(db.clone()).get(&key).await.unwrap(),
        Some(ThreadId("thread_1".into()))
    );
    let fingerprints = SqliteFingerprintStore::new(db);
    assert!(fingerprints.contains(&fp).await.unwrap());
    assert!(!fingerprints.insert(&fp).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sqlite_inserts_have_one_winner() {
    let store = SqliteFingerprintStore::new(Database::open_in_memory().await.unwrap());
    let fp = Fingerprint("aa".repeat(32));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            let fp = fp.clone();
            tokio::spawn(async move { store.insert(&fp).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn memory_store_keeps_one_thread_per_key() {
    let store = MemoryThreadStore::new();
    let key = ConversationKey("1".into());
    store.put(&key, &ThreadId("a".into())).await.unwrap();
    store.put(&key, &ThreadId("b".into())).await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&key).await.unwrap(), Some(ThreadId("b".into())));
    store.remove(&key).await.unwrap();
    assert!(store.is_empty());
}
