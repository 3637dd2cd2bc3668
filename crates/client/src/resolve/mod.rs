//! Short-link resolution.
//!
//! Expands `amzn.to/...` redirect links into their final marketplace URL
//! with a single header-only probe. Inputs that are not short links are
//! returned untouched without any network call.
//!
//! Probes are expected to fail often (captive portals, blocked egress,
//! redirect loops); those failures surface as
//! [`Error::ResolutionBlocked`] with guidance to expand the link by hand.

use std::sync::Arc;

use async_trait::async_trait;

use afflink_core::Error;
use afflink_core::link::{Marketplace, ensure_scheme};

/// Guidance returned when a short link cannot be probed.
pub const BLOCKED_GUIDANCE: &str = "Unable to resolve short link. \
     Please open the link in your browser and paste the full URL here.";

/// Where a header-only probe ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Address after following every redirect.
    pub final_url: String,
    pub status: u16,
    pub status_text: String,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised when a probe could not complete at all.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe timed out")]
    Timeout,

    #[error("redirect chain rejected: {0}")]
    Redirect(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_redirect() {
            ProbeError::Redirect(err.to_string())
        } else {
            ProbeError::Network(err.to_string())
        }
    }
}

/// Issues a header-only request that follows redirects.
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome, ProbeError>;
}

/// Expands shortened marketplace links.
#[derive(Clone)]
pub struct ShortLinkResolver {
    probe: Arc<dyn RedirectProbe>,
    marketplace: Marketplace,
}

impl ShortLinkResolver {
    pub fn new(probe: Arc<dyn RedirectProbe>, marketplace: Marketplace) -> Self {
        Self { probe, marketplace }
    }

    /// Resolve `raw` to its final destination.
    ///
    /// Non-short links come back unchanged. Short links get exactly one
    /// probe attempt; a scheme-less short link is probed over https.
    pub async fn resolve(&self, raw: &str) -> Result<String, Error> {
        if !self.marketplace.is_short_link(raw) {
            return Ok(raw.to_string());
        }

        let target = ensure_scheme(raw);
        let outcome = self.probe.probe(&target).await.map_err(|e| {
            tracing::debug!("short link probe for {} failed: {}", target, e);
            Error::ResolutionBlocked(BLOCKED_GUIDANCE.into())
        })?;

        if !outcome.is_success() {
            return Err(Error::ResolutionFailed(format!(
                "Failed to resolve short link: {} {}",
                outcome.status, outcome.status_text
            )));
        }

        if !self.marketplace.is_destination(&outcome.final_url) {
            tracing::debug!("short link {} landed on {}", target, outcome.final_url);
            return Err(Error::NotAmazonUrl("Resolved URL is not a valid Amazon URL".into()));
        }

        Ok(outcome.final_url)
    }

    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }
}
