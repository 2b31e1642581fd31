//! Cache Module
//!
//! Fault-tolerant access to cached HTTP responses. Store failures never
//! escape this layer: reads degrade to a miss, writes are dropped.

mod access;
mod key;


// Re-export public types
pub use access::ResponseCache;
pub use key::{cache_key, path_pattern, CACHE_KEY_PREFIX};
