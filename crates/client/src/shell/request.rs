//! Request and response values seen by the shell cache.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use afflink_core::{CachedEntry, Error};

/// An outbound request observed by the cache manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    /// Uppercased HTTP method.
    pub method: String,
    pub url: Url,
}

impl ShellRequest {
    pub fn new(method: &str, url: &str) -> Result<Self, Error> {
        let method = method.trim().to_ascii_uppercase();
        if method.is_empty() {
            return Err(Error::InvalidInput("method cannot be empty".into()));
        }
        let url = Url::parse(url.trim()).map_err(|e| Error::InvalidInput(format!("invalid request URL: {e}")))?;
        Ok(Self { method, url })
    }

    pub fn get(url: &str) -> Result<Self, Error> {
        Self::new("GET", url)
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}

/// A response, either live from the network or replayed from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResponse {
    /// Final URL after redirects; for cached responses, the request URL.
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl ShellResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        crate::fetch::content_type(&self.headers)
    }

    /// Snapshot this response as a cache entry keyed by `method` + `key_url`.
    pub fn to_entry(&self, method: &str, key_url: &str) -> CachedEntry {
        CachedEntry::new(method, key_url, self.status, self.headers.clone(), self.body.to_vec())
    }

    /// Rebuild a response from a stored entry.
    pub fn from_entry(entry: CachedEntry) -> Result<Self, Error> {
        let url = Url::parse(&entry.url).map_err(|e| Error::CorruptEntry(format!("{}: {e}", entry.url)))?;
        Ok(Self { url, status: entry.status, headers: entry.headers, body: Bytes::from(entry.body) })
    }
}

/// Performs live network fetches on behalf of the cache manager.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, Error>;
}
