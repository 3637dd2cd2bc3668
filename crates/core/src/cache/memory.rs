//! In-memory generation storage.
//!
//! Mirrors [`CacheDb`](super::CacheDb) semantics without touching disk; used
//! as the deterministic store in tests and when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::storage::{CacheStorage, CachedEntry};
use crate::Error;

type Generation = (String, HashMap<String, CachedEntry>);

/// Generation storage held in process memory.
///
/// Generations are kept in a Vec to preserve creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Vec<Generation>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, generation: &str) -> Result<(), Error> {
        let mut inner = self.inner.write().await;
        if !inner.iter().any(|(name, _)| name == generation) {
            inner.push((generation.to_string(), HashMap::new()));
        }
        Ok(())
    }

    async fn generations(&self) -> Result<Vec<String>, Error> {
        let inner = self.inner.read().await;
        Ok(inner.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn delete(&self, generation: &str) -> Result<bool, Error> {
        let mut inner = self.inner.write().await;
        let before = inner.len();
        inner.retain(|(name, _)| name != generation);
        Ok(inner.len() != before)
    }

    async fn get(&self, generation: &str, key_hash: &str) -> Result<Option<CachedEntry>, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .iter()
            .find(|(name, _)| name == generation)
            .and_then(|(_, entries)| entries.get(key_hash).cloned()))
    }

    async fn put(&self, generation: &str, entry: &CachedEntry) -> Result<(), Error> {
        let mut inner = self.inner.write().await;
        let (_, entries) = inner
            .iter_mut()
            .find(|(name, _)| name == generation)
            .ok_or_else(|| Error::UnknownGeneration(generation.to_string()))?;
        entries.insert(entry.key_hash.clone(), entry.clone());
        Ok(())
    }

    async fn entry_count(&self, generation: &str) -> Result<usize, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .iter()
            .find(|(name, _)| name == generation)
            .map_or(0, |(_, entries)| entries.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(url: &str, body: &str) -> CachedEntry {
        CachedEntry::new("GET", url, 200, Vec::new(), body.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStorage::new();
        let entry = make_entry("http://localhost/", "shell");
        store.open("afflink-shell-v1").await.unwrap();
        store.put("afflink-shell-v1", &entry).await.unwrap();

        assert_eq!(store.generations().await.unwrap(), vec!["afflink-shell-v1"]);
        assert_eq!(store.get("afflink-shell-v1", &entry.key_hash).await.unwrap(), Some(entry));
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let store = MemoryStorage::new();
        store.open("g").await.unwrap();
        store.put("g", &make_entry("http://localhost/", "a")).await.unwrap();
        store.put("g", &make_entry("http://localhost/", "b")).await.unwrap();

        let key = make_entry("http://localhost/", "").key_hash;
        assert_eq!(store.get("g", &key).await.unwrap().unwrap().body, b"b");
        assert_eq!(store.entry_count("g").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStorage::new();
        store.open("v1").await.unwrap();
        store.open("v2").await.unwrap();

        assert!(store.delete("v1").await.unwrap());
        assert!(!store.delete("v1").await.unwrap());
        assert_eq!(store.generations().await.unwrap(), vec!["v2"]);
        assert_eq!(store.entry_count("v1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_never_recreates_generation() {
        let store = MemoryStorage::new();
        store.open("afflink-shell-v1").await.unwrap();
        store.delete("afflink-shell-v1").await.unwrap();

        let result = store.put("afflink-shell-v1", &make_entry("http://localhost/", "late")).await;
        assert!(matches!(result, Err(Error::UnknownGeneration(_))));
        assert!(store.generations().await.unwrap().is_empty());
    }
}
