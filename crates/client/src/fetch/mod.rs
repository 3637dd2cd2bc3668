//! HTTP transport for short-link probes and shell resource fetches.
//!
//! ### Probes
//! - `HEAD` request, redirects followed up to `max_redirects`
//! - The final address is whatever the redirect chain lands on
//!
//! ### Shell fetches
//! - Any method, body read up to `max_bytes`
//! - Non-success statuses are returned, not raised; callers decide
//!
//! Neither path retries.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize};

use crate::resolve::{ProbeError, ProbeOutcome, RedirectProbe};
use crate::shell::{Fetcher, ShellRequest, ShellResponse};
use afflink_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "afflink/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "afflink/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    /// Transport settings taken from the application config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout(), ..Default::default() }
    }
}

/// HTTP client shared by the resolver and the shell cache.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl RedirectProbe for FetchClient {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome, ProbeError> {
        let start = Instant::now();
        let response = self.http.head(url).send().await?;

        let status = response.status();
        let outcome = ProbeOutcome {
            final_url: response.url().to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        };

        tracing::debug!(
            "probed {} -> {} ({}) in {}ms",
            url,
            outcome.final_url,
            outcome.status,
            start.elapsed().as_millis()
        );

        Ok(outcome)
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, Error> {
        let start = Instant::now();
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::InvalidInput(format!("unsupported method: {}", request.method)))?;

        let response = self
            .http
            .request(method, request.url.clone())
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("network error: {}", e)))?;

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::HttpError(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect::<Vec<_>>();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {}", e)))?;

        if body.len() > self.config.max_bytes {
            return Err(Error::HttpError(format!(
                "{} bytes exceeds {}",
                body.len(),
                self.config.max_bytes
            )));
        }

        tracing::debug!(
            "fetched {} {} -> {} in {}ms ({} bytes)",
            request.method,
            request.url,
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(ShellResponse { url: final_url, status, headers, body })
    }
}

/// Content-Type of a header list, if present.
pub fn content_type(headers: &[(String, String)]) -> Option<&str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(header::CONTENT_TYPE.as_str()))
        .map(|(_, v)| v.as_str())
}
