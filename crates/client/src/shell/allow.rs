//! Which request targets the cache manager may touch.

use url::Url;

/// Host that is always cacheable, for local development.
pub const LOCALHOST: &str = "localhost";

/// Hosts whose GET requests are eligible for interception.
///
/// Matching is on scheme and hostname only; ports are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    hosts: Vec<String>,
}

impl AllowList {
    /// Allow the app's own host, `localhost`, and the given font hosts.
    pub fn new(app_origin: &Url, font_hosts: &[String]) -> Self {
        let mut hosts: Vec<String> = app_origin.host_str().map(str::to_lowercase).into_iter().collect();
        hosts.extend(font_hosts.iter().map(|h| h.to_lowercase()));
        hosts.push(LOCALHOST.to_string());
        hosts.dedup();
        Self { hosts }
    }

    pub fn allows(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url
                .host_str()
                .is_some_and(|host| self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> AllowList {
        let origin = Url::parse("https://links.example.org").unwrap();
        AllowList::new(&origin, &["fonts.googleapis.com".into(), "fonts.gstatic.com".into()])
    }

    fn allows(url: &str) -> bool {
        allow_list().allows(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_allows_own_origin() {
        assert!(allows("https://links.example.org/index.html"));
        assert!(allows("http://links.example.org:8080/icons/icon-192x192.png"));
    }

    #[test]
    fn test_allows_fonts_and_localhost() {
        assert!(allows("https://fonts.googleapis.com/css2?family=Roboto"));
        assert!(allows("https://fonts.gstatic.com/s/roboto/v30/font.woff2"));
        assert!(allows("http://localhost:3000/"));
    }

    #[test]
    fn test_rejects_other_hosts_and_schemes() {
        assert!(!allows("https://www.amazon.in/dp/B000X"));
        assert!(!allows("chrome-extension://abcdef/script.js"));
        assert!(!allows("ws://links.example.org/socket"));
    }

    #[test]
    fn test_hosts_listed() {
        assert_eq!(allow_list().hosts.len(), 4);
    }
}
