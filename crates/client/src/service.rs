//! End-to-end conversion: resolve short links, then tag.

use serde::{Deserialize, Serialize};

use crate::resolve::ShortLinkResolver;
use afflink_core::{Error, LinkConverter};

/// Result of converting one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// The trimmed input as received.
    pub input: String,
    /// Expanded destination, when the input was a short link.
    pub resolved: Option<String>,
    /// The affiliate-tagged URL.
    pub affiliate_url: String,
}

/// Runs the resolver and the conversion pipeline in order.
#[derive(Clone)]
pub struct LinkService {
    resolver: ShortLinkResolver,
    converter: LinkConverter,
}

impl LinkService {
    pub fn new(resolver: ShortLinkResolver, converter: LinkConverter) -> Self {
        Self { resolver, converter }
    }

    /// Convert a raw input, expanding it first if it is a short link.
    ///
    /// Any failure discards intermediate results.
    pub async fn convert_link(&self, raw: &str) -> Result<Conversion, Error> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(Error::EmptyInput("Please enter an Amazon link".into()));
        }

        let resolved = if self.resolver.marketplace().is_short_link(input) {
            Some(self.resolver.resolve(input).await?)
        } else {
            None
        };

        let affiliate_url = self.converter.convert(resolved.as_deref().unwrap_or(input))?;
        tracing::info!(short_link = resolved.is_some(), "converted link");

        Ok(Conversion { input: input.to_string(), resolved, affiliate_url })
    }
}
