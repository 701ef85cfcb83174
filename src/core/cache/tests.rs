//! Unit tests for the key-value stores

use super::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// Counts backend reads so memoization can be observed.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    gets: AtomicUsize,
}

impl KvStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        self.inner.lrange(key).await
    }
}

#[test]
fn test_cache_base_dir() {
    let path = cache_base_dir();
    assert!(path.to_string_lossy().contains("fantasy-nexus"));
}

#[test]
fn test_try_read_to_string_existing_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("test.txt");

    fs::write(&file_path, "hello world").unwrap();

    let content = try_read_to_string(&file_path);
    assert_eq!(content, Some("hello world".to_string()));
}

#[test]
fn test_try_read_to_string_nonexistent_file() {
    let dir = tempdir().unwrap();
    let content = try_read_to_string(&dir.path().join("nonexistent.txt"));
    assert_eq!(content, None);
}

#[test]
fn test_write_string_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("subdir").join("output.txt");

    write_string(&file_path, "test content").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "test content");
}

#[tokio::test]
async fn test_memory_store_get_and_lrange() {
    let mut store = MemoryStore::new();
    store.insert("nfl:proj:1", json!({"identity": {"player_id": "1"}}));
    store.insert_list("nfl:rank", vec![json!("{\"a\":1}"), json!({"b": 2})]);

    assert!(store.get("nfl:proj:1").await.unwrap().is_some());
    assert!(store.get("missing").await.unwrap().is_none());
    assert_eq!(store.lrange("nfl:rank").await.unwrap().len(), 2);
    assert!(store.lrange("missing").await.unwrap().is_empty());
}

#[test]
fn test_file_store_sanitizes_key() {
    let store = FileStore::new("/tmp/kv");
    let path = store.value_path("nfl:rankcache:WEEK:2025:12:full_ppr_6pt:FLEX");
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "nfl_rankcache_WEEK_2025_12_full_ppr_6pt_FLEX.json"
    );
    assert!(store
        .list_path("a/b")
        .to_string_lossy()
        .ends_with("a_b.list.json"));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.put("nfl:proj:42", &json!({"score": 12.5})).unwrap();
    store
        .put_list("nfl:rank", &[json!({"player_id": "1"}), json!("{\"player_id\":\"2\"}")])
        .unwrap();

    assert_eq!(
        store.get("nfl:proj:42").await.unwrap(),
        Some(json!({"score": 12.5}))
    );
    assert_eq!(store.lrange("nfl:rank").await.unwrap().len(), 2);
    assert!(store.get("nfl:proj:missing").await.unwrap().is_none());
    assert!(store.lrange("nfl:missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_store_list_must_be_array() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    write_string(&store.list_path("k"), "{\"not\": \"a list\"}").unwrap();

    let err = store.lrange("k").await.unwrap_err();
    assert!(matches!(err, NexusError::Store { .. }));
}

#[tokio::test]
async fn test_memo_store_reads_backend_once() {
    let mut backend = CountingStore::default();
    backend.inner.insert("k", json!(1));
    let memo = MemoStore::new(backend, 4);

    assert_eq!(memo.get("k").await.unwrap(), Some(json!(1)));
    assert_eq!(memo.get("k").await.unwrap(), Some(json!(1)));
    assert_eq!(memo.get("absent").await.unwrap(), None);
    assert_eq!(memo.get("absent").await.unwrap(), None);

    assert_eq!(memo.memo_stats(), (2, 4));
    let backend = memo.into_inner();
    assert_eq!(backend.gets.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_memo_store_evicts_least_recent() {
    let memo = MemoStore::new(CountingStore::default(), 2);

    for key in ["a", "b", "c"] {
        memo.get(key).await.unwrap();
    }
    assert_eq!(memo.memo_stats(), (2, 2));

    // "a" was evicted and has to be read again.
    memo.get("a").await.unwrap();
    assert_eq!(memo.into_inner().gets.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_store_by_reference() {
    let mut store = MemoryStore::new();
    store.insert("k", json!("v"));
    let by_ref = &store;
    assert_eq!(by_ref.get("k").await.unwrap(), Some(json!("v")));
}
