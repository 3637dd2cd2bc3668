//! Affiliate link conversion pipeline.
//!
//! ### Steps
//! 1. **Normalize**: trim, reject blank input, prepend `https://` for known
//!    scheme-less hosts, require a parseable URL mentioning a marketplace
//!    domain.
//! 2. **Strip**: drop any existing `tag` query parameter.
//! 3. **Inject**: set `tag` to the canonical affiliate id.
//!
//! The pipeline is synchronous and idempotent: converting its own output
//! yields the same string.

pub mod marketplace;
pub mod normalize;
pub mod tag;

pub use marketplace::{AFFILIATE_TAG_KEY, DEFAULT_AFFILIATE_TAG, Marketplace};
pub use normalize::{ensure_scheme, normalize};
pub use tag::{inject_tag, strip_tag};

use crate::Error;

/// Converts marketplace links into affiliate links.
#[derive(Debug, Clone)]
pub struct LinkConverter {
    marketplace: Marketplace,
    affiliate_tag: String,
}

impl Default for LinkConverter {
    fn default() -> Self {
        Self::new(Marketplace::default(), DEFAULT_AFFILIATE_TAG)
    }
}

impl LinkConverter {
    pub fn new(marketplace: Marketplace, affiliate_tag: impl Into<String>) -> Self {
        Self { marketplace, affiliate_tag: affiliate_tag.into() }
    }

    /// Run the full pipeline on a raw input.
    ///
    /// On failure nothing is partially applied; the caller still owns the
    /// original input.
    pub fn convert(&self, raw: &str) -> Result<String, Error> {
        let valid = normalize(raw, &self.marketplace)?;
        let clean = strip_tag(&valid, AFFILIATE_TAG_KEY)?;
        let tagged = inject_tag(&clean, AFFILIATE_TAG_KEY, &self.affiliate_tag)?;
        tracing::debug!("converted {} -> {}", valid, tagged);
        Ok(tagged)
    }
}

/// Convert with the default marketplace and affiliate id.
pub fn convert(raw: &str) -> Result<String, Error> {
    LinkConverter::default().convert(raw)
}
