//! Client configuration
//!
//! Base URLs and cache settings for the rating client. The defaults point at
//! production; the binary overrides them from flags or the `SKYRATING_*`
//! environment variables through `Cli::rating_config`.

use std::time::Duration;

/// Direct rating API endpoint
pub const DEFAULT_API_URL: &str =
    "https://data.mongodb-api.com/app/skywise-sl-lptdr/endpoint/rating/v1";

/// Caching proxy in front of the rating API
pub const DEFAULT_PROXY_URL: &str = "https://cache-proxy.lemonapi.com/skywise/rating/v1";

/// How long loaded ratings are served from the local cache, in seconds
pub const DEFAULT_LOCAL_CACHE_TTL: u64 = 3600;

/// Environment variable overriding [`DEFAULT_API_URL`]
pub const ENV_API_URL: &str = "SKYRATING_API_URL";
/// Environment variable overriding [`DEFAULT_PROXY_URL`]
pub const ENV_PROXY_URL: &str = "SKYRATING_PROXY_URL";
/// Environment variable overriding [`DEFAULT_LOCAL_CACHE_TTL`]
pub const ENV_CACHE_TTL: &str = "SKYRATING_CACHE_TTL";
/// Environment variable setting a request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SKYRATING_TIMEOUT_SECS";

/// Settings for [`crate::rating::RatingClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RatingConfig {
    /// Direct API base URL, used for writes and for reads without a proxy TTL
    pub api_url: String,
    /// Caching proxy base URL, used for reads with a proxy TTL
    pub proxy_url: String,
    /// Local cache TTL for reads in seconds; 0 disables the local cache
    pub local_cache_ttl: u64,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            local_cache_ttl: DEFAULT_LOCAL_CACHE_TTL,
            timeout: None,
        }
    }
}
