//! Marketplace recognition constants.
//!
//! Recognition is substring based on the full URL text, not host-anchored:
//! a path or query that happens to contain `amazon.in` also qualifies.

/// Primary marketplace domain.
pub const PRIMARY_DOMAIN: &str = "amazon.in";

/// Short-path alias domain.
pub const ALIAS_DOMAIN: &str = "amzn.in";

/// Shortened-link (redirect) domain.
pub const SHORT_DOMAIN: &str = "amzn.to";

/// Scheme-less prefixes that get `https://` prepended during normalization.
pub const SCHEMELESS_PREFIXES: &[&str] = &["amzn.in", "www.amazon.in", "amzn.to"];

/// Query key carrying the affiliate marker.
pub const AFFILIATE_TAG_KEY: &str = "tag";

/// Canonical affiliate id injected when none is configured.
pub const DEFAULT_AFFILIATE_TAG: &str = "syrez-21";

/// The set of domains a link must mention to be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketplace {
    pub primary_domain: String,
    pub alias_domain: String,
    pub short_domain: String,
    pub schemeless_prefixes: Vec<String>,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self {
            primary_domain: PRIMARY_DOMAIN.to_string(),
            alias_domain: ALIAS_DOMAIN.to_string(),
            short_domain: SHORT_DOMAIN.to_string(),
            schemeless_prefixes: SCHEMELESS_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Marketplace {
    /// True if the text mentions any recognized domain, short links included.
    pub fn is_recognized(&self, text: &str) -> bool {
        self.is_destination(text) || text.contains(&self.short_domain)
    }

    /// True if the text mentions the primary or alias domain.
    ///
    /// A resolved short link must land here; landing on another short link
    /// does not count.
    pub fn is_destination(&self, text: &str) -> bool {
        text.contains(&self.primary_domain) || text.contains(&self.alias_domain)
    }

    /// True if the text looks like a shortened link (`amzn.to/` anywhere).
    pub fn is_short_link(&self, text: &str) -> bool {
        text.contains(&format!("{}/", self.short_domain))
    }

    /// True if a scheme-less input may have `https://` prepended.
    pub fn accepts_schemeless(&self, text: &str) -> bool {
        self.schemeless_prefixes.iter().any(|p| text.starts_with(p.as_str()))
    }
}
