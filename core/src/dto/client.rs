use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{lenient_id, null_as_default};
use crate::error::ApiError;
use crate::normalize::{format_date, is_truthy, is_truthy_flag, parse_amount, INVALID_DATE};
use crate::presentation::{ClientBadge, StatusBadge};

/// Kind of counterparty. Anything other than `"company"` is treated as an
/// individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Company,
    #[default]
    #[serde(other)]
    Individual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEmail {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPhone {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

/// Client as the backend sends it, nested inside projects and transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClient {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub client_type: Option<ClientType>,
    #[serde(default)]
    pub balance: Value,
    #[serde(default)]
    pub is_supplier: Value,
    #[serde(default)]
    pub is_conflict: Value,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<ClientEmail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phones: Vec<ClientPhone>,
}

/// Counterparty embedded in projects and transactions. Every field is
/// optional on the wire; flags default to `false` and contacts to empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: Option<i64>,
    pub client_type: ClientType,
    /// NaN when the backend omits the balance or sends something non-numeric.
    pub balance: f64,
    pub is_supplier: bool,
    pub is_conflict: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub emails: Vec<ClientEmail>,
    pub phones: Vec<ClientPhone>,
}

impl From<RawClient> for Client {
    fn from(raw: RawClient) -> Self {
        Self {
            id: raw.id,
            client_type: raw.client_type.unwrap_or_default(),
            balance: parse_amount(&raw.balance),
            is_supplier: is_truthy_flag(&raw.is_supplier),
            is_conflict: is_truthy_flag(&raw.is_conflict),
            first_name: raw.first_name,
            last_name: raw.last_name,
            contact_person: raw.contact_person,
            address: raw.address,
            note: raw.note,
            status: is_truthy_flag(&raw.status),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            emails: raw.emails,
            phones: raw.phones,
        }
    }
}

impl Client {
    /// Badges in display order: client type first, then conflict, then
    /// supplier.
    pub fn badges(&self) -> Vec<ClientBadge> {
        let mut badges = vec![match self.client_type {
            ClientType::Company => ClientBadge::Company,
            ClientType::Individual => ClientBadge::Individual,
        }];
        if self.is_conflict {
            badges.push(ClientBadge::Conflict);
        }
        if self.is_supplier {
            badges.push(ClientBadge::Supplier);
        }
        badges
    }

    pub fn status_badge(&self) -> StatusBadge {
        StatusBadge::from(self.status)
    }

    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn phone_numbers(&self) -> Vec<&str> {
        self.phones.iter().map(|p| p.phone.as_str()).collect()
    }

    pub fn email_addresses(&self) -> Vec<&str> {
        self.emails.iter().map(|e| e.email.as_str()).collect()
    }

    pub fn format_created_at(&self) -> String {
        self.created_at
            .as_deref()
            .map_or_else(|| INVALID_DATE.to_string(), format_date)
    }

    pub fn format_updated_at(&self) -> String {
        self.updated_at
            .as_deref()
            .map_or_else(|| INVALID_DATE.to_string(), format_date)
    }
}

/// Build the client embedded in a project or transaction payload.
///
/// Null, `false`, zero, the empty string and a missing field all mean "no
/// client". A truthy value that is not an object carries no client fields and
/// is dropped with a warning.
pub fn embed_client(value: &Value) -> Result<Option<Client>, ApiError> {
    if !is_truthy(value) {
        return Ok(None);
    }
    if !value.is_object() {
        warn!(client = %value, "ignoring non-object client payload");
        return Ok(None);
    }
    let raw = RawClient::deserialize(value)
        .map_err(|e| ApiError::DeserializationError(format!("client: {e}")))?;
    Ok(Some(Client::from(raw)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client(payload: Value) -> Client {
        embed_client(&payload).unwrap().expect("client should be embedded")
    }

    #[test]
    fn flags_are_normalized() {
        let c = client(json!({
            "id": 9,
            "is_supplier": "1",
            "is_conflict": 0,
            "status": 1,
            "emails": [],
            "phones": []
        }));
        assert_eq!(c.id, Some(9));
        assert!(c.is_supplier);
        assert!(!c.is_conflict);
        assert!(c.status);
    }

    #[test]
    fn missing_client_yields_none() {
        for value in [Value::Null, json!(false), json!(0), json!("")] {
            assert!(embed_client(&value).unwrap().is_none(), "{value}");
        }
    }

    #[test]
    fn non_object_client_is_dropped() {
        assert!(embed_client(&json!(true)).unwrap().is_none());
        assert!(embed_client(&json!("acme")).unwrap().is_none());
    }

    #[test]
    fn empty_object_is_a_client() {
        let c = client(json!({}));
        assert_eq!(c.id, None);
        assert!(c.emails.is_empty() && c.phones.is_empty());
        assert!(!c.is_supplier && !c.is_conflict && !c.status);
        assert_eq!(c.client_type, ClientType::Individual);
    }

    #[test]
    fn contacts_without_ids_are_kept() {
        let c = client(json!({
            "emails": [{"email": "ann@x.io"}],
            "phones": [{"id": "4", "client_id": "2", "phone": "+7 900"}]
        }));
        assert_eq!(c.emails[0].id, None);
        assert_eq!(c.email_addresses(), vec!["ann@x.io"]);
        assert_eq!(c.phones[0].id, Some(4));
        assert_eq!(c.phones[0].client_id, Some(2));
    }

    #[test]
    fn non_numeric_client_id_is_rejected() {
        let err = embed_client(&json!({"id": "nine"})).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn contacts_keep_order_and_default_to_empty() {
        let c = client(json!({
            "id": 1,
            "emails": [
                {"id": 3, "client_id": 1, "email": "b@x.io"},
                {"id": 1, "client_id": 1, "email": "a@x.io"}
            ]
        }));
        assert_eq!(c.email_addresses(), vec!["b@x.io", "a@x.io"]);
        assert!(c.phones.is_empty());

        let c = client(json!({"id": 2, "emails": null, "phones": null}));
        assert!(c.emails.is_empty());
        assert!(c.phones.is_empty());
    }

    #[test]
    fn all_fields_are_carried_over() {
        let c = client(json!({
            "id": 4,
            "client_type": "company",
            "balance": "250.75",
            "is_supplier": true,
            "is_conflict": "1",
            "first_name": "ООО Ромашка",
            "last_name": null,
            "contact_person": "Иван",
            "address": "Москва",
            "note": "VIP",
            "status": "0",
            "created_at": "2024-01-02T08:00:00.000000Z",
            "updated_at": "2024-02-03 09:30:00",
            "phones": [{"id": 7, "client_id": 4, "phone": "+7 900 000 00 00"}]
        }));
        assert_eq!(c.client_type, ClientType::Company);
        assert_eq!(c.balance, 250.75);
        assert!(c.is_supplier && c.is_conflict && !c.status);
        assert_eq!(c.contact_person.as_deref(), Some("Иван"));
        assert_eq!(c.full_name(), "ООО Ромашка");
        assert_eq!(c.phone_numbers(), vec!["+7 900 000 00 00"]);
        assert_eq!(c.format_created_at(), "2024-01-02");
        assert_eq!(c.format_updated_at(), "2024-02-03");
    }

    #[test]
    fn unknown_client_type_is_individual() {
        let c = client(json!({"id": 1, "client_type": "partner"}));
        assert_eq!(c.client_type, ClientType::Individual);
        let c = client(json!({"id": 1, "client_type": null}));
        assert_eq!(c.client_type, ClientType::Individual);
        assert!(c.balance.is_nan());
    }

    #[test]
    fn badges_follow_type_conflict_supplier_order() {
        let c = client(json!({"id": 1, "client_type": "company", "is_supplier": 1, "is_conflict": 1}));
        assert_eq!(
            c.badges(),
            vec![ClientBadge::Company, ClientBadge::Conflict, ClientBadge::Supplier]
        );
        let c = client(json!({"id": 1, "client_type": "individual"}));
        assert_eq!(c.badges(), vec![ClientBadge::Individual]);
    }

    #[test]
    fn status_badge_tracks_status() {
        assert_eq!(client(json!({"id": 1, "status": true})).status_badge(), StatusBadge::Active);
        assert_eq!(client(json!({"id": 1, "status": "1"})).status_badge(), StatusBadge::Active);
        assert_eq!(client(json!({"id": 1})).status_badge(), StatusBadge::Inactive);
    }

    #[test]
    fn missing_timestamps_render_as_invalid() {
        let c = client(json!({"id": 1}));
        assert_eq!(c.format_created_at(), INVALID_DATE);
        assert_eq!(c.full_name(), "");
    }
}
