//! Cache key derivation.

/// Prefix shared by every response cache key.
pub const CACHE_KEY_PREFIX: &str = "cache:";

/// Builds the cache key for a request path including its query string.
///
/// The query is used verbatim: `?a=1&b=2` and `?b=2&a=1` are distinct keys.
pub fn cache_key(path_and_query: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, path_and_query)
}

/// Glob pattern covering every cached response under `path_prefix`.
pub fn path_pattern(path_prefix: &str) -> String {
    format!("{}{}*", CACHE_KEY_PREFIX, path_prefix)
}
