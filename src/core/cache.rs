//! Key-value cache access.
//!
//! Precomputed rankings and projections live in an external key-value cache.
//! [`KvStore`] is the narrow read surface the rest of the crate needs (`GET`
//! and a full `LRANGE`), with three backends:
//!
//! - [`UpstashStore`](crate::core::http::UpstashStore): the production cache over REST
//! - [`FileStore`]: JSON snapshots on disk, one file per key
//! - [`MemoryStore`]: in-process map, mostly for tests
//!
//! [`MemoStore`] wraps any of them with a bounded LRU memo. It is created per
//! command and passed by reference, so nothing is shared across invocations.

use crate::error::{NexusError, Result};
use lru::LruCache;
use serde_json::Value;
use std::{
    collections::HashMap,
    fs,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Base directory for on-disk state: `~/.cache/fantasy-nexus`.
pub fn cache_base_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("fantasy-nexus")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Something that renders to a cache key string.
pub trait CacheKey {
    fn to_key(&self) -> String;
}

/// Read access to a key-value cache.
#[allow(async_fn_in_trait)]
pub trait KvStore {
    /// `GET key`; `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// `LRANGE key 0 -1`; empty when the key is absent.
    async fn lrange(&self, key: &str) -> Result<Vec<Value>>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key).await
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        (**self).lrange(key).await
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    lists: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn insert_list(&mut self, key: impl Into<String>, entries: Vec<Value>) {
        self.lists.insert(key.into(), entries);
    }
}

impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        Ok(self.lists.get(key).cloned().unwrap_or_default())
    }
}

/// JSON snapshot store.
///
/// `GET key` reads `<dir>/<key>.json`; `LRANGE key` reads `<dir>/<key>.list.json`,
/// which must hold a JSON array. Characters outside `[A-Za-z0-9._-]` in keys
/// become `_` in file names.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_stem(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::file_stem(key)))
    }

    pub fn list_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.list.json", Self::file_stem(key)))
    }

    pub fn put(&self, key: &str, value: &Value) -> Result<()> {
        write_string(&self.value_path(key), &serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn put_list(&self, key: &str, entries: &[Value]) -> Result<()> {
        write_string(&self.list_path(key), &serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match try_read_to_string(&self.value_path(key)) {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        let Some(contents) = try_read_to_string(&self.list_path(key)) else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&contents)? {
            Value::Array(entries) => Ok(entries),
            _ => Err(NexusError::Store {
                message: format!("{} does not hold a JSON array", self.list_path(key).display()),
            }),
        }
    }
}

/// Bounded memo of `GET` results in front of another store.
///
/// Misses are memoized too, so a key is read from the backend at most once
/// while it stays in the LRU. `LRANGE` always goes to the backend.
pub struct MemoStore<S> {
    inner: S,
    memo: Mutex<LruCache<String, Option<Value>>>,
    capacity: usize,
}

impl<S: KvStore> MemoStore<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let size = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            memo: Mutex::new(LruCache::new(size)),
            capacity,
        }
    }

    /// (entries held, capacity)
    pub fn memo_stats(&self) -> (usize, usize) {
        let held = self.memo.lock().map(|memo| memo.len()).unwrap_or(0);
        (held, self.capacity)
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: KvStore> KvStore for MemoStore<S> {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if let Ok(mut memo) = self.memo.lock() {
            if let Some(hit) = memo.get(key) {
                return Ok(hit.clone());
            }
        }

        let value = self.inner.get(key).await?;
        if let Ok(mut memo) = self.memo.lock() {
            memo.put(key.to_string(), value.clone());
        }
        Ok(value)
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        self.inner.lrange(key).await
    }
}

#[cfg(test)]
mod tests;
