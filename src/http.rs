//! HTTP transport
//!
//! A thin layer over `reqwest` that sends a request and hands back either the
//! decoded body with its status and final URL, or a `TransportError` that says
//! exactly what failed and carries whatever the server sent back.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors raised by the transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// Target URL including the query string
        url: String,
        /// Response body, parsed as JSON when possible, otherwise the raw text
        body: serde_json::Value,
    },

    /// The request could not be built or no response was received
    #[error("{source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body does not match the expected shape
    #[error("Failed to decode response body: {source}")]
    Decode {
        url: String,
        status: u16,
        body: serde_json::Value,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }

    /// URL the request was sent to
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Network { url, .. } | Self::Decode { url, .. } => url,
        }
    }

    /// Response body, if one was received
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::Network { .. } => None,
        }
    }
}

/// Transport-level request options
///
/// Holds only what the transport understands. Caching options live elsewhere
/// and never reach this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters, appended in order
    pub params: Vec<(String, String)>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options: no params, no headers, no timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Appends a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if !self.params.is_empty() {
            builder = builder.query(&self.params);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}

/// A successful response with its transport metadata
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Final URL including the query string
    pub url: String,
    /// Decoded body
    pub data: T,
}

/// Client for issuing JSON requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HttpClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new HttpClient with a custom reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends a GET request and decodes the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.send(self.client.request(Method::GET, url), url, options)
            .await
    }

    /// Sends a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.send(self.client.request(Method::POST, url).json(body), url, options)
            .await
    }

    /// Sends a PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.send(self.client.request(Method::PUT, url).json(body), url, options)
            .await
    }

    /// Sends a PUT request with a form-encoded body
    pub async fn put_form<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        form: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        self.send(self.client.request(Method::PUT, url).form(form), url, options)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse<T>, TransportError> {
        let request = options
            .apply(builder)
            .build()
            .map_err(|source| TransportError::Network {
                url: url.to_string(),
                source,
            })?;
        let target = request.url().to_string();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| TransportError::Network {
                url: target.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| TransportError::Network {
                url: target.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: target,
                body: parse_body(&text),
            });
        }

        // Empty 2xx bodies decode as JSON null, which suits `()` and `Option<_>`.
        let raw = if text.trim().is_empty() { "null" } else { &text };
        match serde_json::from_str::<T>(raw) {
            Ok(data) => Ok(HttpResponse {
                status: status.as_u16(),
                url: target,
                data,
            }),
            Err(source) => Err(TransportError::Decode {
                url: target,
                status: status.as_u16(),
                body: parse_body(&text),
                source,
            }),
        }
    }
}

/// Parses a response body as JSON, falling back to the raw text
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
