//! Offline cache for the application shell.
//!
//! ### Lifecycle
//! - **install**: open the current generation and pre-cache every manifest
//!   path; one failed resource fails the whole install and nothing is stored
//! - **activate**: delete every generation other than the current one
//! - **fetch**: serve allow-listed GETs cache-first, storing successful
//!   same-origin responses in the background
//!
//! The phases are driven by [`LifecycleController`].
//!
//! ### Interception rules
//! - Non-GET requests and hosts outside the [`AllowList`] pass through
//!   without being inspected or cached
//! - Cache writes never delay or fail the response
//! - Network failures reach the caller unchanged; there is no fallback page

pub mod allow;
pub mod lifecycle;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use url::Url;

use crate::fetch::canonicalize;
use afflink_core::cache::hash::compute_request_key;
use afflink_core::{AppConfig, CacheStorage, Error};

pub use allow::AllowList;
pub use lifecycle::{LifecycleController, LifecycleHandler, WorkerState};
pub use request::{Fetcher, ShellRequest, ShellResponse};

/// How an intercepted request was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Served from the current generation; no network call was made.
    Cached(ShellResponse),
    /// Fetched live (and possibly stored for next time).
    Network(ShellResponse),
    /// Not ours to handle; the host performs the request as usual.
    Passthrough,
}

impl Interception {
    pub fn source(&self) -> &'static str {
        match self {
            Interception::Cached(_) => "cache",
            Interception::Network(_) => "network",
            Interception::Passthrough => "passthrough",
        }
    }
}

/// Settings for one build's shell cache.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Origin the shell is served from.
    pub origin: Url,
    /// Name of this build's cache generation.
    pub generation: String,
    /// Paths pre-cached on install, relative to `origin`.
    pub manifest: Vec<String>,
    /// Cross-origin font hosts allowed through the cache.
    pub font_hosts: Vec<String>,
}

impl ShellConfig {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        let origin = Url::parse(&config.app_origin)
            .map_err(|e| Error::InvalidInput(format!("invalid app_origin {}: {e}", config.app_origin)))?;
        Ok(Self {
            origin,
            generation: config.generation_name(),
            manifest: config.shell_manifest.clone(),
            font_hosts: config.font_hosts.clone(),
        })
    }
}

/// Cache manager for the application shell.
#[derive(Clone)]
pub struct ShellCache {
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    origin: Url,
    generation: String,
    manifest: Vec<String>,
    allow: AllowList,
}

impl ShellCache {
    pub fn new(config: ShellConfig, storage: Arc<dyn CacheStorage>, fetcher: Arc<dyn Fetcher>) -> Self {
        let allow = AllowList::new(&config.origin, &config.font_hosts);
        Self {
            storage,
            fetcher,
            origin: config.origin,
            generation: config.generation,
            manifest: config.manifest,
            allow,
        }
    }

    /// Name of the generation this build writes to.
    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn storage(&self) -> &Arc<dyn CacheStorage> {
        &self.storage
    }

    /// Open the current generation and store every manifest resource.
    ///
    /// All resources are fetched before anything is written, so a failed
    /// install leaves the generation empty. Returns the number stored.
    pub async fn precache(&self) -> Result<usize, Error> {
        self.storage.open(&self.generation).await?;

        let mut fetched = Vec::with_capacity(self.manifest.len());
        for path in &self.manifest {
            let url = self
                .origin
                .join(path)
                .map_err(|e| Error::InstallFailed(format!("{path}: {e}")))?;
            let request = ShellRequest { method: "GET".into(), url };
            let response = self
                .fetcher
                .fetch(&request)
                .await
                .map_err(|e| Error::InstallFailed(format!("{path}: {e}")))?;
            if !response.is_success() {
                return Err(Error::InstallFailed(format!("{path}: status {}", response.status)));
            }
            fetched.push((request, response));
        }

        for (request, response) in &fetched {
            let key_url = canonicalize(request.url.as_str())
                .map_err(|e| Error::InstallFailed(format!("{}: {e}", request.url)))?;
            let entry = response.to_entry(&request.method, key_url.as_str());
            self.storage
                .put(&self.generation, &entry)
                .await
                .map_err(|e| Error::InstallFailed(format!("{}: {e}", request.url)))?;
        }

        tracing::info!(generation = %self.generation, resources = fetched.len(), "shell cache installed");
        Ok(fetched.len())
    }

    /// Delete every generation except the current one. Returns the deleted names.
    pub async fn purge_stale(&self) -> Result<Vec<String>, Error> {
        let mut deleted = Vec::new();
        for name in self.storage.generations().await? {
            if name != self.generation && self.storage.delete(&name).await? {
                deleted.push(name);
            }
        }

        if !deleted.is_empty() {
            tracing::info!(generation = %self.generation, ?deleted, "deleted stale shell generations");
        }
        Ok(deleted)
    }

    /// Answer a request cache-first, or decline it.
    pub async fn intercept(&self, request: &ShellRequest) -> Result<Interception, Error> {
        if !request.is_get() || !self.allow.allows(&request.url) {
            return Ok(Interception::Passthrough);
        }

        let Ok(key_url) = canonicalize(request.url.as_str()) else {
            return Ok(Interception::Passthrough);
        };
        let key = compute_request_key(&request.method, key_url.as_str());

        match self.storage.get(&self.generation, &key).await {
            Ok(Some(entry)) => match ShellResponse::from_entry(entry) {
                Ok(response) => {
                    tracing::debug!("cache hit for {}", key_url);
                    return Ok(Interception::Cached(response));
                }
                Err(e) => tracing::warn!("ignoring unreadable cache entry for {}: {}", key_url, e),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("cache lookup for {} failed: {}", key_url, e),
        }

        let response = self.fetcher.fetch(request).await?;

        if self.is_storable(&response) {
            self.store_detached(request.method.clone(), key_url.to_string(), response.clone());
        }

        Ok(Interception::Network(response))
    }

    /// Perform a request without consulting or filling the cache.
    pub async fn passthrough(&self, request: &ShellRequest) -> Result<ShellResponse, Error> {
        self.fetcher.fetch(request).await
    }

    /// Only complete, same-origin responses are worth keeping.
    fn is_storable(&self, response: &ShellResponse) -> bool {
        response.status == 200 && response.url.origin() == self.origin.origin()
    }

    /// Write `response` under the current generation without blocking the caller.
    ///
    /// A generation deleted by a newer build is not recreated; the write fails
    /// and is only logged.
    fn store_detached(&self, method: String, key_url: String, response: ShellResponse) {
        let storage = Arc::clone(&self.storage);
        let generation = self.generation.clone();
        tokio::spawn(async move {
            let entry = response.to_entry(&method, &key_url);
            match storage.put(&generation, &entry).await {
                Ok(()) => tracing::debug!("cached {}", entry.url),
                Err(e) => tracing::warn!(url = %entry.url, "cache write failed: {}", e),
            }
        });
    }
}
