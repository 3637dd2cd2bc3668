//! URL canonicalization for request identity.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string so equivalent requests share a cache key.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an http(s) scheme
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_basic() {
        let url = canonicalize("http://127.0.0.1:3000/index.html").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://FONTS.GSTATIC.COM/s/roboto.woff2").unwrap();
        assert_eq!(url.host_str(), Some("fonts.gstatic.com"));
    }

    #[test]
    fn test_canonicalize_remove_fragment() {
        let url = canonicalize("http://localhost/index.html#top").unwrap();
        assert_eq!(url.as_str(), "http://localhost/index.html");
    }

    #[test]
    fn test_canonicalize_preserve_query() {
        let url = canonicalize("https://fonts.googleapis.com/css2?family=Roboto&display=swap").unwrap();
        assert_eq!(url.query(), Some("family=Roboto&display=swap"));
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize("chrome-extension://abcdef/script.js");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize(""), Err(UrlError::Empty)));
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_canonicalize_relative() {
        assert!(matches!(canonicalize("/index.html"), Err(UrlError::InvalidUrl(_))));
    }
}
