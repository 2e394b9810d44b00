//! Read-through GET in front of the HTTP transport
//!
//! `CachedClient::get` serves a stored body while it is younger than the TTL
//! the caller asks for, and otherwise goes to the network and stores what
//! comes back. Writes bypass the store entirely.

use std::sync::Arc;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::key::cache_key;
use super::store::{CacheStore, CachedResponse};
use crate::http::{HttpClient, HttpResponse, RequestOptions, TransportError};

/// Options for a cache-aware GET
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
    /// Maximum age in seconds of a stored body that may be served.
    /// `None` or `Some(0)` disables caching for the call.
    pub cache_ttl: Option<u64>,
    /// Options forwarded to the transport on a live fetch
    pub request: RequestOptions,
}

impl GetOptions {
    /// Creates options with caching disabled and default transport options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables caching with the given TTL in seconds
    pub fn cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = Some(seconds);
        self
    }

    /// Sets the transport options
    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }

    fn effective_ttl(&self) -> Option<u64> {
        self.cache_ttl.filter(|ttl| *ttl > 0)
    }
}

/// HTTP client with an optional response cache on GET
#[derive(Debug, Clone)]
pub struct CachedClient {
    http: HttpClient,
    store: Arc<CacheStore>,
}

impl Default for CachedClient {
    fn default() -> Self {
        Self::new(HttpClient::new(), Arc::new(CacheStore::new()))
    }
}

impl CachedClient {
    /// Creates a client that caches into `store`
    pub fn new(http: HttpClient, store: Arc<CacheStore>) -> Self {
        Self { http, store }
    }

    /// The store this client reads from and writes to
    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Fetches `url`, serving a stored body when one is fresh enough
    ///
    /// # Behavior
    /// - Without a positive `cache_ttl` the store is neither read nor written
    /// - A stored body younger than `cache_ttl` is returned with no network call
    /// - Otherwise the body is fetched live and stored on success
    /// - Transport failures are returned unchanged and leave the store as it was
    pub async fn get<T>(
        &self,
        url: &str,
        options: &GetOptions,
    ) -> Result<CachedResponse<T>, TransportError>
    where
        T: DeserializeOwned,
    {
        let Some(ttl) = options.effective_ttl() else {
            let response = self.http.get::<T>(url, &options.request).await?;
            return Ok(CachedResponse {
                data: response.data,
            });
        };

        let key = cache_key(url, &options.request.params);

        if let Some(entry) = self.store.get(&key) {
            if entry.is_fresh(ttl, Utc::now()) {
                match serde_json::from_value::<T>(entry.value.data) {
                    Ok(data) => {
                        debug!(url, key = %key, "cache hit");
                        return Ok(CachedResponse { data });
                    }
                    Err(e) => {
                        debug!(url, key = %key, error = %e, "cached body does not match requested type, refetching");
                    }
                }
            } else {
                debug!(url, key = %key, ttl, "cache entry stale");
            }
        } else {
            debug!(url, key = %key, "cache miss");
        }

        let response = self.http.get::<serde_json::Value>(url, &options.request).await?;
        let data = serde_json::from_value::<T>(response.data.clone()).map_err(|source| {
            TransportError::Decode {
                url: response.url.clone(),
                status: response.status,
                body: response.data.clone(),
                source,
            }
        })?;

        self.store.set(key, CachedResponse { data: response.data });
        debug!(url, "stored fresh response");

        Ok(CachedResponse { data })
    }

    /// Sends a POST; never touches the cache
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.http.post(url, body, options).await
    }

    /// Sends a PUT; never touches the cache
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.http.put(url, body, options).await
    }

    /// Sends a form-encoded PUT; never touches the cache
    pub async fn put_form<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        form: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.http.put_form(url, form, options).await
    }
}
