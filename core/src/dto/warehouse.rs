use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;
use crate::normalize::format_date;

#[derive(Debug, Clone, Deserialize)]
pub struct RawWarehouse {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// A storage location and the users allowed to work with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub users: Vec<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RawWarehouse> for Warehouse {
    fn from(raw: RawWarehouse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            users: raw.users,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

impl Warehouse {
    pub fn format_created_at(&self) -> String {
        format_date(&self.created_at)
    }
}
