//! Normalized error reporting
//!
//! `ApiError` turns any failure into the `{ meta, error: { code, title, detail } }`
//! shape used by the API's error responses, so callers can report failures
//! the same way no matter where they came from.

use std::error::Error as StdError;

use thiserror::Error;

use crate::api::{ErrorApiResponse, ErrorBody, ErrorMeta, RequestMeta, ResponseMeta};
use crate::http::TransportError;

/// Code reported when no HTTP status is available
pub const UNKNOWN_ERROR_CODE: u16 = 520;

/// A failure described in the API's error format
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{title}")]
pub struct ApiError {
    /// HTTP status of the failed response, or 520
    pub code: u16,
    /// `"{context} - {message}"`
    pub title: String,
    /// Free-form detail; only ever set by the caller
    pub detail: Option<String>,
    /// Request and response context, when known
    pub meta: ErrorMeta,
}

impl ApiError {
    fn with_message(context: &str, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        Self {
            code: UNKNOWN_ERROR_CODE,
            title: format!("{} - {}", context, message),
            detail: None,
            meta: ErrorMeta::default(),
        }
    }

    /// Describes a failure with no further information
    pub fn unknown(context: &str) -> Self {
        Self::with_message(context, None)
    }

    /// Describes an arbitrary error by its message, with code 520
    pub fn from_error(context: &str, error: &(dyn StdError + 'static)) -> Self {
        Self::with_message(context, Some(error.to_string()))
    }

    /// Describes a transport failure
    ///
    /// A non-2xx response contributes its status as the code, plus the
    /// request URL and the response body. Failures without a usable status
    /// report code 520 but keep the URL, and the body when one was received.
    pub fn from_transport(context: &str, error: &TransportError) -> Self {
        let mut api_error = Self::with_message(context, Some(error.to_string()));

        if let TransportError::Status { status, .. } = error {
            api_error.code = *status;
        }
        api_error.meta.request = Some(RequestMeta {
            url: error.url().to_string(),
        });
        api_error.meta.response = error.body().map(|body| ResponseMeta { data: body.clone() });

        api_error
    }

    /// Sets the detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builds the serializable error response
    pub fn to_obj(&self) -> ErrorApiResponse {
        ErrorApiResponse {
            version: None,
            meta: self.meta.clone(),
            error: ErrorBody {
                code: self.code,
                title: self.title.clone(),
                detail: self.detail.clone(),
            },
        }
    }
}
