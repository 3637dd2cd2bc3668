//! Affiliate marker removal and injection.
//!
//! Both steps re-serialize the whole query string, so untouched parameters
//! may come back re-encoded or with `+` for spaces.

use crate::Error;
use url::Url;

/// Remove every query parameter whose key is exactly `key`.
pub fn strip_tag(input: &str, key: &str) -> Result<String, Error> {
    let mut url = Url::parse(input).map_err(|_| Error::UrlProcessingFailed("Failed to process URL".into()))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    write_query(&mut url, &pairs);
    Ok(url.into())
}

/// Set `key` to `value`, replacing the first occurrence in place and
/// dropping any later ones; appends when absent.
pub fn inject_tag(input: &str, key: &str, value: &str) -> Result<String, Error> {
    let mut url = Url::parse(input).map_err(|_| Error::TagInjectionFailed("Failed to add affiliate tag".into()))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (k, v) in url.query_pairs() {
        if k == key {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    write_query(&mut url, &pairs);
    Ok(url.into())
}

fn write_query(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}
