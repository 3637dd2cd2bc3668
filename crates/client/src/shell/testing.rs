//! In-process fakes for shell cache tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use super::{Fetcher, ShellRequest, ShellResponse};
use afflink_core::{CacheStorage, CachedEntry, Error, MemoryStorage};

pub(crate) const ORIGIN: &str = "http://127.0.0.1:3000";

#[derive(Clone)]
struct Route {
    status: u16,
    body: &'static str,
    final_url: Option<&'static str>,
}

/// Serves canned responses and counts calls; unknown URLs fail like a
/// dropped connection.
#[derive(Default)]
pub(crate) struct StubFetcher {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn route(&self, url: &str, status: u16, body: &'static str) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route { status, body, final_url: None });
    }

    pub(crate) fn redirect(&self, url: &str, final_url: &'static str, body: &'static str) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route { status: 200, body, final_url: Some(final_url) });
    }

    /// Route every path of the default shell manifest to a 200.
    pub(crate) fn serve_manifest(&self, manifest: &[String]) {
        for path in manifest {
            self.route(&format!("{ORIGIN}{path}"), 200, "shell");
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, Error> {
        self.calls.lock().unwrap().push(request.url.to_string());
        let route = self.routes.lock().unwrap().get(request.url.as_str()).cloned();
        let route = route.ok_or_else(|| Error::HttpError("network error: connection refused".into()))?;
        let url = match route.final_url {
            Some(final_url) => Url::parse(final_url).unwrap(),
            None => request.url.clone(),
        };
        Ok(ShellResponse {
            url,
            status: route.status,
            headers: vec![("content-type".into(), "text/html".into())],
            body: Bytes::from_static(route.body.as_bytes()),
        })
    }
}

/// Storage whose writes always fail; reads delegate to an empty store.
#[derive(Default)]
pub(crate) struct ReadOnlyStorage {
    inner: MemoryStorage,
}

#[async_trait]
impl CacheStorage for ReadOnlyStorage {
    async fn open(&self, generation: &str) -> Result<(), Error> {
        self.inner.open(generation).await
    }

    async fn generations(&self) -> Result<Vec<String>, Error> {
        self.inner.generations().await
    }

    async fn delete(&self, generation: &str) -> Result<bool, Error> {
        self.inner.delete(generation).await
    }

    async fn get(&self, generation: &str, key_hash: &str) -> Result<Option<CachedEntry>, Error> {
        self.inner.get(generation, key_hash).await
    }

    async fn put(&self, _generation: &str, _entry: &CachedEntry) -> Result<(), Error> {
        Err(Error::CorruptEntry("disk full".into()))
    }

    async fn entry_count(&self, generation: &str) -> Result<usize, Error> {
        self.inner.entry_count(generation).await
    }
}

/// Wait for detached cache writes to land.
pub(crate) async fn wait_for_entries(storage: &dyn CacheStorage, generation: &str, expected: usize) -> usize {
    let mut count = 0;
    for _ in 0..100 {
        count = storage.entry_count(generation).await.unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    count
}
