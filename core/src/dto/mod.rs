//! Typed records built from backend payloads.
//!
//! # Design
//! Each resource has a `Raw*` wire struct that mirrors the backend JSON
//! (snake_case, loosely typed where the backend is loose) and a DTO built
//! from it through `From`/`TryFrom`. Coercion of flags, amounts and nested
//! entities happens only in those conversions, via [`crate::normalize`], so a
//! DTO is always fully normalized once it exists. DTOs are never mutated after
//! construction; formatting methods are pure reads.

pub mod balance_history;
pub mod client;
pub mod pagination;
pub mod payload;
pub mod project;
pub mod sale_product;
pub mod transaction;
pub mod warehouse;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use balance_history::{BalanceSource, ClientBalanceHistory, RawBalanceEntry};
pub use client::{embed_client, Client, ClientEmail, ClientPhone, ClientType, RawClient};
pub use pagination::{PaginatedResponse, RawPage};
pub use payload::{ProjectPayload, TransactionPayload};
pub use project::{Project, RawProject};
pub use sale_product::{ProductRecord, RawSaleProduct, SaleProduct};
pub use transaction::{RawTransaction, Transaction};
pub use warehouse::{RawWarehouse, Warehouse};

/// Deserialize `null` the same way as a missing field. Pair with
/// `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Optional integer id that may arrive as a number or a numeric string.
/// `null`, a missing field and a blank string all give `None`. Pair with
/// `#[serde(default)]`.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid id: {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid id: {s:?}"))),
        Some(other) => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}
