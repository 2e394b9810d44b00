//! Response envelopes shared by the rating API and error reporting
//!
//! Success bodies carry their payload under `data`; error bodies carry an
//! `error` object with a numeric code and a human-readable title.

use serde::{Deserialize, Serialize};

/// Successful API response wrapping a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
    pub data: T,
}

impl<T> SuccessApiResponse<T> {
    /// Wraps `data` with no version or meta
    pub fn new(data: T) -> Self {
        Self {
            version: None,
            meta: None,
            data,
        }
    }
}

/// Error details of an [`ErrorApiResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Request context attached to a reported error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    pub url: String,
}

/// Response context attached to a reported error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub data: serde_json::Value,
}

/// Metadata of an [`ErrorApiResponse`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseMeta>,
}

/// Error API response, as produced by [`crate::error::ApiError::to_obj`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub meta: ErrorMeta,
    pub error: ErrorBody,
}
