//! Error type for the back-office data-access layer.
//!
//! # Design
//! The backend never returns a structured error body that this layer
//! understands, so there is no per-status variant. A network failure lands in
//! `Transport`, every non-2xx response lands in `HttpError` with the raw
//! status and body, and both count as the single "request failed" kind
//! reported by [`ApiError::is_request_failure`]. The remaining variants cover
//! JSON encoding of request bodies and decoding of response payloads.

use thiserror::Error;

/// Errors returned by the dispatcher and the resource controllers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body did not match the expected payload shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// True for failures of the round trip itself: transport errors and
    /// non-success statuses.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::HttpError { .. })
    }

    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
