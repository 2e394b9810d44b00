//! Rating API client
//!
//! Loads rating counts and averages for a set of item ids, and submits new
//! ratings. Reads go through the local response cache and degrade to an empty
//! result when the API is unavailable; writes always hit the API and report
//! their failures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::api::SuccessApiResponse;
use crate::cache::{CachedClient, GetOptions};
use crate::config::RatingConfig;
use crate::http::{HttpResponse, RequestOptions, TransportError};

/// Proxy TTL used when the caller has no preference, in seconds
pub const DEFAULT_PROXY_TTL: u64 = 300;

/// Aggregated rating for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingInfo {
    /// Number of ratings received
    pub count: u64,
    /// Average rating, formatted by the API
    pub rating: String,
}

/// Ratings keyed by item id
pub type Ratings = HashMap<String, RatingInfo>;

/// Response to a ratings load
pub type ApiResRatings = SuccessApiResponse<Ratings>;

/// Response to a rating submission; the API echoes an arbitrary object
pub type ApiResRated = SuccessApiResponse<serde_json::Value>;

/// JSON body of a rating submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct RatingBody {
    rating: f64,
}

/// Client for the rating API
#[derive(Debug, Clone)]
pub struct RatingClient {
    client: CachedClient,
    config: RatingConfig,
}

impl Default for RatingClient {
    fn default() -> Self {
        Self::new(CachedClient::default(), RatingConfig::default())
    }
}

impl RatingClient {
    /// Creates a client on top of a cache-aware HTTP client
    pub fn new(client: CachedClient, config: RatingConfig) -> Self {
        Self { client, config }
    }

    /// Creates a client with its own fresh cache
    pub fn with_config(config: RatingConfig) -> Self {
        Self::new(CachedClient::default(), config)
    }

    /// The configuration this client was created with
    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// The underlying cache-aware client
    pub fn client(&self) -> &CachedClient {
        &self.client
    }

    fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        options.timeout = self.config.timeout;
        options
    }

    /// Loads ratings for `ids` in `collection` with the default proxy TTL
    pub async fn load_ratings_default<S: AsRef<str>>(&self, collection: &str, ids: &[S]) -> Ratings {
        self.load_ratings(collection, ids, DEFAULT_PROXY_TTL).await
    }

    /// Loads ratings for `ids` in `collection`
    ///
    /// # Arguments
    /// * `collection` - Name of the rated collection (e.g. "movies")
    /// * `ids` - Item ids to load
    /// * `proxy_ttl` - Upstream caching hint in seconds for the caching proxy.
    ///   With `0` the direct API is queried instead of the proxy.
    ///
    /// # Returns
    /// The ratings found, keyed by id. Any failure is logged and yields an
    /// empty map.
    ///
    /// # Behavior
    /// Responses are kept in the local cache for `local_cache_ttl` seconds,
    /// independently of `proxy_ttl`, so repeated loads within that window do
    /// not reach the network.
    pub async fn load_ratings<S: AsRef<str>>(
        &self,
        collection: &str,
        ids: &[S],
        proxy_ttl: u64,
    ) -> Ratings {
        let base_url = if proxy_ttl > 0 {
            &self.config.proxy_url
        } else {
            &self.config.api_url
        };
        let keys = ids.iter().map(|id| id.as_ref()).collect::<Vec<&str>>().join(",");

        let request = self
            .request_options()
            .param("action", "load")
            .param("ttl", proxy_ttl)
            .param("collection", collection)
            // reqwest sends this as `keys=a%2Cb`; the API decodes it back to `a,b`.
            .param("keys", keys);
        let options = GetOptions::new()
            .cache_ttl(self.config.local_cache_ttl)
            .request(request);

        match self.client.get::<ApiResRatings>(base_url, &options).await {
            Ok(response) => {
                debug!(collection, count = response.data.data.len(), "loaded ratings");
                response.data.data
            }
            Err(e) => {
                error!(collection, error = %e, "Failed to load ratings");
                Ratings::new()
            }
        }
    }

    /// Submits a rating for `id` in `collection`
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - The API's response with its status
    /// * `Err(TransportError)` - The transport failure, unchanged
    pub async fn post_rating(
        &self,
        collection: &str,
        id: &str,
        rating: f64,
    ) -> Result<HttpResponse<ApiResRated>, TransportError> {
        let options = self
            .request_options()
            .param("action", "rate")
            .param("collection", collection)
            .param("keys", id)
            .param("rating", rating);

        self.client
            .post(&self.config.api_url, &RatingBody { rating }, &options)
            .await
    }
}
