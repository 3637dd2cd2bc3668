//! Input validation and scheme normalization.

use super::marketplace::Marketplace;
use crate::Error;

pub(crate) const MSG_EMPTY: &str = "Please enter a URL";
pub(crate) const MSG_NOT_AMAZON: &str = "Not a valid Amazon URL";
const MSG_INVALID_FORMAT: &str = "Invalid URL format";

/// Validate a raw input and return it as an absolute URL string.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace; blank input is rejected
/// 2. Prepend `https://` only for recognized scheme-less prefixes
/// 3. Require the result to parse as a URL
/// 4. Require a marketplace domain somewhere in the parsed URL
///
/// The domain check runs on the URL crate's serialization, so dot segments
/// that vanish on parsing cannot satisfy it. The returned text is the
/// trimmed input (with scheme).
pub fn normalize(input: &str, marketplace: &Marketplace) -> Result<String, Error> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::EmptyInput(MSG_EMPTY.into()));
    }

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if marketplace.accepts_schemeless(trimmed) {
        format!("https://{trimmed}")
    } else {
        return Err(Error::NotAmazonUrl(MSG_NOT_AMAZON.into()));
    };

    let parsed = url::Url::parse(&normalized).map_err(|e| {
        tracing::debug!("rejecting {normalized}: {e}");
        Error::InvalidUrlFormat(MSG_INVALID_FORMAT.into())
    })?;

    if !marketplace.is_recognized(parsed.as_str()) {
        return Err(Error::NotAmazonUrl(MSG_NOT_AMAZON.into()));
    }

    Ok(normalized)
}

/// Prepend `https://` when the text has no `http(s)://` scheme.
pub fn ensure_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) { trimmed.to_string() } else { format!("https://{trimmed}") }
}

fn has_http_scheme(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<String, Error> {
        normalize(input, &Marketplace::default())
    }

    #[test]
    fn test_normalize_keeps_schemed_url() {
        assert_eq!(run("https://www.amazon.in/dp/B000X").unwrap(), "https://www.amazon.in/dp/B000X");
        assert_eq!(run("http://www.amazon.in/dp/B000X").unwrap(), "http://www.amazon.in/dp/B000X");
    }

    #[test]
    fn test_normalize_prepends_https_for_short_host() {
        assert_eq!(run("amzn.in/d/abc123").unwrap(), "https://amzn.in/d/abc123");
        assert_eq!(run("www.amazon.in/dp/B000X").unwrap(), "https://www.amazon.in/dp/B000X");
        assert_eq!(run("amzn.to/3xyz").unwrap(), "https://amzn.to/3xyz");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(run("  https://amzn.in/d/abc123 \n").unwrap(), "https://amzn.in/d/abc123");
    }

    #[test]
    fn test_normalize_empty() {
        assert!(matches!(run(""), Err(Error::EmptyInput(_))));
        assert!(matches!(run("   "), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_normalize_schemeless_unknown_host() {
        assert!(matches!(run("example.com/amazon.in"), Err(Error::NotAmazonUrl(_))));
        assert!(matches!(run("amazon.in/dp/B000X"), Err(Error::NotAmazonUrl(_))));
    }

    #[test]
    fn test_normalize_other_scheme_rejected() {
        assert!(matches!(run("ftp://www.amazon.in/dp/B000X"), Err(Error::NotAmazonUrl(_))));
    }

    #[test]
    fn test_normalize_not_amazon() {
        assert!(matches!(run("https://example.com"), Err(Error::NotAmazonUrl(_))));
    }

    #[test]
    fn test_normalize_invalid_format_checked_before_domain() {
        assert!(matches!(run("https://"), Err(Error::InvalidUrlFormat(_))));
        assert!(matches!(run("https://www.amazon.in:99999/dp"), Err(Error::InvalidUrlFormat(_))));
    }

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(ensure_scheme("amzn.to/3xyz"), "https://amzn.to/3xyz");
        assert_eq!(ensure_scheme(" http://amzn.to/3xyz"), "http://amzn.to/3xyz");
    }

    #[test]
    fn test_domain_in_removed_dot_segment_rejected() {
        assert!(matches!(run("https://example.com/amazon.in/../x"), Err(Error::NotAmazonUrl(_))));
    }
}
