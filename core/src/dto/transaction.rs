use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{embed_client, Client};
use super::lenient_id;
use crate::error::ApiError;
use crate::normalize::{format_date, is_truthy_flag, parse_amount, INVALID_DATE};

/// Cash-flow record as listed by `/transactions`. `cash_*` fields describe the
/// cash register and the amount in its currency; `orig_*` fields the amount
/// as entered.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub id: i64,
    #[serde(rename = "type", default, deserialize_with = "lenient_id")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub is_transfer: Value,
    #[serde(default, deserialize_with = "lenient_id")]
    pub cash_id: Option<i64>,
    #[serde(default)]
    pub cash_name: Option<String>,
    #[serde(default)]
    pub cash_amount: Value,
    #[serde(default, deserialize_with = "lenient_id")]
    pub cash_currency_id: Option<i64>,
    #[serde(default)]
    pub cash_currency_name: Option<String>,
    #[serde(default)]
    pub cash_currency_code: Option<String>,
    #[serde(default)]
    pub cash_currency_symbol: Option<String>,
    #[serde(default)]
    pub orig_amount: Value,
    #[serde(default, deserialize_with = "lenient_id")]
    pub orig_currency_id: Option<i64>,
    #[serde(default)]
    pub orig_currency_name: Option<String>,
    #[serde(default)]
    pub orig_currency_code: Option<String>,
    #[serde(default)]
    pub orig_currency_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client: Value,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Cash-flow record with amounts parsed and the client embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: Option<i64>,
    pub is_transfer: bool,
    pub cash_id: Option<i64>,
    pub cash_name: Option<String>,
    pub cash_amount: f64,
    pub cash_currency_id: Option<i64>,
    pub cash_currency_name: Option<String>,
    pub cash_currency_code: Option<String>,
    pub cash_currency_symbol: Option<String>,
    pub orig_amount: f64,
    pub orig_currency_id: Option<i64>,
    pub orig_currency_name: Option<String>,
    pub orig_currency_code: Option<String>,
    pub orig_currency_symbol: Option<String>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_type: Option<i64>,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub client_id: Option<i64>,
    pub client: Option<Client>,
    pub note: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = ApiError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        Ok(Self {
            client: embed_client(&raw.client)?,
            id: raw.id,
            kind: raw.kind,
            is_transfer: is_truthy_flag(&raw.is_transfer),
            cash_id: raw.cash_id,
            cash_name: raw.cash_name,
            cash_amount: parse_amount(&raw.cash_amount),
            cash_currency_id: raw.cash_currency_id,
            cash_currency_name: raw.cash_currency_name,
            cash_currency_code: raw.cash_currency_code,
            cash_currency_symbol: raw.cash_currency_symbol,
            orig_amount: parse_amount(&raw.orig_amount),
            orig_currency_id: raw.orig_currency_id,
            orig_currency_name: raw.orig_currency_name,
            orig_currency_code: raw.orig_currency_code,
            orig_currency_symbol: raw.orig_currency_symbol,
            user_id: raw.user_id,
            user_name: raw.user_name,
            category_id: raw.category_id,
            category_name: raw.category_name,
            category_type: raw.category_type,
            project_id: raw.project_id,
            project_name: raw.project_name,
            client_id: raw.client_id,
            note: raw.note,
            date: raw.date,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl Transaction {
    pub fn format_date(&self) -> String {
        self.date
            .as_deref()
            .map_or_else(|| INVALID_DATE.to_string(), format_date)
    }

    pub fn format_created_at(&self) -> String {
        self.created_at
            .as_deref()
            .map_or_else(|| INVALID_DATE.to_string(), format_date)
    }
}
