//! Request identity keys for cached entries.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request: SHA-256 over method and URL.
///
/// The method is uppercased so `get` and `GET` share an entry.
pub fn compute_request_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// True if `key` has the shape produced by [`compute_request_key`].
pub fn is_valid_key(key: &str) -> bool {
    key.len() == 64 && key.chars().all(|c| c.is_ascii_hexdigit())
}
