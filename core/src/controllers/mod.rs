//! Resource controllers: one module of free functions per backend resource.
//!
//! # Design
//! Controllers hold no state. Each operation issues exactly one request
//! through [`Api`](crate::client::Api), maps the payload into DTOs and returns
//! them. A failure is logged with `tracing::error!` and handed back to the
//! caller unchanged: no retries, no fallback values, no partial pages.
//! Store and update return the backend's echo as raw JSON.

pub mod projects;
pub mod transactions;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
