use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{embed_client, Client};
use super::{lenient_id, null_as_default};
use crate::error::ApiError;
use crate::normalize::{format_date, parse_amount, INVALID_DATE};

#[derive(Debug, Clone, Deserialize)]
pub struct RawProject {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub budget: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client: Value,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A project with its budget parsed and the client embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub budget: f64,
    pub date: Option<String>,
    pub client_id: Option<i64>,
    pub client: Option<Client>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    /// Users with access to the project, passed through as sent.
    pub users: Vec<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl TryFrom<RawProject> for Project {
    type Error = ApiError;

    fn try_from(raw: RawProject) -> Result<Self, Self::Error> {
        Ok(Self {
            client: embed_client(&raw.client)?,
            id: raw.id,
            name: raw.name,
            budget: parse_amount(&raw.budget),
            date: raw.date,
            client_id: raw.client_id,
            user_id: raw.user_id,
            user_name: raw.user_name,
            users: raw.users,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl Project {
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
