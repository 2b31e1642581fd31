//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis connection URL; the in-memory store is used when unset
    pub redis_url: Option<String>,
    /// Expiration in seconds for cached responses
    pub cache_expiration: u64,
    /// Sweep interval in seconds for the in-memory store
    pub cleanup_interval: u64,
    /// Secret used to sign access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub jwt_expires_in: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REDIS_URL` - Redis connection URL (default: unset)
    /// - `CACHE_EXPIRATION` - Cached response lifetime in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    /// - `JWT_SECRET` - Token signing secret (default: "change-me")
    /// - `JWT_EXPIRES_IN` - Token lifetime in seconds (default: 30 days)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            cache_expiration: parse_var("CACHE_EXPIRATION").unwrap_or(defaults.cache_expiration),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expires_in: parse_var("JWT_EXPIRES_IN").unwrap_or(defaults.jwt_expires_in),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_url: None,
            cache_expiration: 300,
            cleanup_interval: 1,
            jwt_secret: "change-me".to_string(),
            jwt_expires_in: 30 * 24 * 60 * 60,
        }
    }
}
