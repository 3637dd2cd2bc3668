//! Generation-scoped key-value storage for cached responses.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::hash::compute_request_key;
use crate::Error;

/// A cached request/response pair inside one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
    pub key_hash: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub stored_at: String,
}

impl CachedEntry {
    /// Build an entry keyed by `method` + `url`, stamped with the current time.
    pub fn new(method: &str, url: &str, status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            key_hash: compute_request_key(method, url),
            method: method.to_ascii_uppercase(),
            url: url.to_string(),
            status,
            headers,
            body,
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Storage for named cache generations.
///
/// There is no locking beyond what the backend does itself: concurrent
/// writes to the same key resolve as last writer wins.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Create the generation if it does not exist.
    async fn open(&self, generation: &str) -> Result<(), Error>;

    /// All generation names in creation order.
    async fn generations(&self) -> Result<Vec<String>, Error>;

    /// Delete a generation and its entries. Returns false if it did not exist.
    async fn delete(&self, generation: &str) -> Result<bool, Error>;

    /// Look up an entry by request key.
    async fn get(&self, generation: &str, key_hash: &str) -> Result<Option<CachedEntry>, Error>;

    /// Insert or overwrite an entry.
    ///
    /// The generation must already exist; a deleted generation is never
    /// recreated by a write ([`Error::UnknownGeneration`]).
    async fn put(&self, generation: &str, entry: &CachedEntry) -> Result<(), Error>;

    /// Number of entries in a generation (0 if it does not exist).
    async fn entry_count(&self, generation: &str) -> Result<usize, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_normalizes_method() {
        let entry = CachedEntry::new("get", "https://example.com/", 200, Vec::new(), Vec::new());
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.key_hash, compute_request_key("GET", "https://example.com/"));
    }
}
