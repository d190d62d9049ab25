//! In-memory stand-in for the back-office REST backend.
//!
//! Serves `/projects` and `/transactions` with the same envelopes and loose
//! encodings as the real backend: flags as `0`/`1` integers, amounts as
//! decimal strings, nested `client` objects or `null`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailRow {
    pub id: i64,
    pub client_id: i64,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhoneRow {
    pub id: i64,
    pub client_id: i64,
    pub phone: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: i64,
    pub client_type: String,
    pub balance: String,
    pub is_supplier: u8,
    pub is_conflict: u8,
    pub first_name: String,
    pub last_name: Option<String>,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: u8,
    pub created_at: String,
    pub updated_at: String,
    pub emails: Vec<EmailRow>,
    pub phones: Vec<PhoneRow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub budget: String,
    pub date: Option<String>,
    pub client_id: Option<i64>,
    pub user_id: i64,
    pub user_name: String,
    pub users: Vec<UserRef>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CashRow {
    pub id: i64,
    pub name: String,
    pub currency_id: i64,
    pub currency_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: i64,
    pub is_transfer: u8,
    pub cash_id: i64,
    pub cash_name: String,
    pub cash_amount: String,
    pub cash_currency_id: i64,
    pub cash_currency_name: String,
    pub cash_currency_code: String,
    pub cash_currency_symbol: String,
    pub orig_amount: String,
    pub orig_currency_id: i64,
    pub orig_currency_name: String,
    pub orig_currency_code: String,
    pub orig_currency_symbol: String,
    pub user_id: i64,
    pub user_name: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_type: Option<i64>,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub client_id: Option<i64>,
    pub note: Option<String>,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub budget: Option<f64>,
    pub date: Option<String>,
    pub client_id: Option<i64>,
    #[serde(default)]
    pub users: Vec<i64>,
}

#[derive(Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: i64,
    pub cash_id: i64,
    pub orig_amount: f64,
    pub currency_id: Option<i64>,
    pub category_id: Option<i64>,
    pub project_id: Option<i64>,
    pub client_id: Option<i64>,
    pub note: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ProjectsQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub page: Option<usize>,
    pub cash_id: Option<i64>,
    pub date_filter_type: Option<String>,
}

/// Paged list envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Value>,
    pub current_page: usize,
    pub next_page: Option<usize>,
    pub last_page: usize,
    pub total: usize,
}

#[derive(Clone, Debug)]
pub struct Store {
    pub per_page: usize,
    pub clients: Vec<ClientRow>,
    pub cashes: Vec<CashRow>,
    pub projects: Vec<ProjectRow>,
    pub transactions: Vec<TransactionRow>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            clients: Vec::new(),
            cashes: Vec::new(),
            projects: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

const SEED_TIMESTAMP: &str = "2024-03-01T09:00:00.000000Z";

impl Store {
    /// Three clients, two cash registers, 25 projects (every third without a
    /// client) and four transactions.
    pub fn seeded() -> Self {
        let clients = vec![
            seed_client(1, "company", "ООО Ромашка", None, 1, 0, 1, &["office@romashka.ru"], &["+7 495 000 00 01"]),
            seed_client(2, "individual", "Иван", Some("Петров"), 0, 1, 1, &[], &["+7 900 000 00 02", "+7 900 000 00 03"]),
            seed_client(3, "individual", "Анна", Some("Сидорова"), 0, 0, 0, &["anna@example.com"], &[]),
        ];
        let cashes = vec![
            CashRow {
                id: 1,
                name: "Основная касса".to_string(),
                currency_id: 1,
                currency_name: "Российский рубль".to_string(),
                currency_code: "RUB".to_string(),
                currency_symbol: "₽".to_string(),
            },
            CashRow {
                id: 2,
                name: "Валютная касса".to_string(),
                currency_id: 2,
                currency_name: "Доллар США".to_string(),
                currency_code: "USD".to_string(),
                currency_symbol: "$".to_string(),
            },
        ];
        let projects = (1..=25)
            .map(|id| ProjectRow {
                id,
                name: format!("Проект {id}"),
                budget: format!("{}.00", id * 1000),
                date: Some("2024-03-15 00:00:00".to_string()),
                client_id: if id % 3 == 0 { None } else { Some(id % 3) },
                user_id: 1,
                user_name: "admin".to_string(),
                users: vec![UserRef {
                    id: 1,
                    name: "admin".to_string(),
                }],
                created_at: SEED_TIMESTAMP.to_string(),
                updated_at: SEED_TIMESTAMP.to_string(),
            })
            .collect();

        let mut store = Self {
            clients,
            cashes,
            projects,
            ..Self::default()
        };
        let seeds = [
            (1, 1, 1500.0, Some(1), Some(2), "Оплата по договору"),
            (0, 1, 300.0, None, None, "Канцтовары"),
            (1, 2, 200.0, Some(2), Some(1), "Аванс"),
            (0, 2, 50.5, None, Some(3), "Возврат"),
        ];
        for (kind, cash_id, amount, project_id, client_id, note) in seeds {
            let input = TransactionInput {
                kind,
                cash_id,
                orig_amount: amount,
                currency_id: None,
                category_id: None,
                project_id,
                client_id,
                note: Some(note.to_string()),
                date: Some("2024-03-20 12:00:00".to_string()),
            };
            if let Some(row) = store.new_transaction(input) {
                store.transactions.push(row);
            }
        }
        store
    }

    fn client_json(&self, client_id: Option<i64>) -> Value {
        client_id
            .and_then(|id| self.clients.iter().find(|c| c.id == id))
            .map(|c| json!(c))
            .unwrap_or(Value::Null)
    }

    fn project_json(&self, row: &ProjectRow) -> Value {
        let mut item = json!(row);
        item["client"] = self.client_json(row.client_id);
        item
    }

    fn transaction_json(&self, row: &TransactionRow) -> Value {
        let mut item = json!(row);
        item["client"] = self.client_json(row.client_id);
        item
    }

    /// Build a transaction row for `input`, or `None` if the cash register
    /// does not exist.
    fn new_transaction(&self, input: TransactionInput) -> Option<TransactionRow> {
        let cash = self.cashes.iter().find(|c| c.id == input.cash_id)?;
        let id = self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let amount = format!("{:.2}", input.orig_amount);
        let project_name = input
            .project_id
            .and_then(|pid| self.projects.iter().find(|p| p.id == pid))
            .map(|p| p.name.clone());
        Some(TransactionRow {
            id,
            kind: input.kind,
            is_transfer: 0,
            cash_id: cash.id,
            cash_name: cash.name.clone(),
            cash_amount: amount.clone(),
            cash_currency_id: cash.currency_id,
            cash_currency_name: cash.currency_name.clone(),
            cash_currency_code: cash.currency_code.clone(),
            cash_currency_symbol: cash.currency_symbol.clone(),
            orig_amount: amount,
            orig_currency_id: input.currency_id.unwrap_or(cash.currency_id),
            orig_currency_name: cash.currency_name.clone(),
            orig_currency_code: cash.currency_code.clone(),
            orig_currency_symbol: cash.currency_symbol.clone(),
            user_id: 1,
            user_name: "admin".to_string(),
            category_id: input.category_id,
            category_name: None,
            category_type: None,
            project_id: input.project_id,
            project_name,
            client_id: input.client_id,
            note: input.note,
            date: input.date.unwrap_or_else(|| SEED_TIMESTAMP.to_string()),
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_client(
    id: i64,
    client_type: &str,
    first_name: &str,
    last_name: Option<&str>,
    is_supplier: u8,
    is_conflict: u8,
    status: u8,
    emails: &[&str],
    phones: &[&str],
) -> ClientRow {
    ClientRow {
        id,
        client_type: client_type.to_string(),
        balance: "0.00".to_string(),
        is_supplier,
        is_conflict,
        first_name: first_name.to_string(),
        last_name: last_name.map(str::to_string),
        contact_person: None,
        address: None,
        note: None,
        status,
        created_at: SEED_TIMESTAMP.to_string(),
        updated_at: SEED_TIMESTAMP.to_string(),
        emails: emails
            .iter()
            .zip(1..)
            .map(|(email, n)| EmailRow {
                id: id * 10 + n,
                client_id: id,
                email: email.to_string(),
            })
            .collect(),
        phones: phones
            .iter()
            .zip(1..)
            .map(|(phone, n)| PhoneRow {
                id: id * 10 + n,
                client_id: id,
                phone: phone.to_string(),
            })
            .collect(),
    }
}

/// Slice `items` into the requested 1-based page. Pages past the end are
/// empty but keep the real `last_page` and `total`.
pub fn paginate(items: Vec<Value>, page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total = items.len();
    let last_page = total.div_ceil(per_page).max(1);
    let current_page = page.max(1);
    let items = items
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        current_page,
        next_page: (current_page < last_page).then_some(current_page + 1),
        last_page,
        total,
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router over the seeded store.
pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/all", get(all_projects))
        .route("/projects/{id}", put(update_project))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/{id}", put(update_transaction))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_projects(State(db): State<Db>, Query(query): Query<ProjectsQuery>) -> Json<Page> {
    let store = db.read().await;
    let items = store.projects.iter().map(|p| store.project_json(p)).collect();
    let page = query.page.unwrap_or(1);
    debug!(page, "listing projects");
    Json(paginate(items, page, store.per_page))
}

async fn all_projects(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(store.projects.iter().map(|p| store.project_json(p)).collect())
}

async fn create_project(State(db): State<Db>, Json(input): Json<ProjectInput>) -> (StatusCode, Json<Value>) {
    let mut store = db.write().await;
    let id = store.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let row = ProjectRow {
        id,
        name: input.name,
        budget: format!("{:.2}", input.budget.unwrap_or(0.0)),
        date: input.date,
        client_id: input.client_id,
        user_id: 1,
        user_name: "admin".to_string(),
        users: input
            .users
            .into_iter()
            .map(|id| UserRef {
                id,
                name: format!("user{id}"),
            })
            .collect(),
        created_at: SEED_TIMESTAMP.to_string(),
        updated_at: SEED_TIMESTAMP.to_string(),
    };
    let item = store.project_json(&row);
    store.projects.push(row);
    info!(id, "project created");
    (StatusCode::CREATED, Json(json!({ "message": "Project created", "item": item })))
}

async fn update_project(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ProjectInput>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let row = store
        .projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    row.name = input.name;
    if let Some(budget) = input.budget {
        row.budget = format!("{budget:.2}");
    }
    if input.date.is_some() {
        row.date = input.date;
    }
    row.client_id = input.client_id;
    let row = row.clone();
    info!(id, "project updated");
    Ok(Json(json!({ "message": "Project updated", "item": store.project_json(&row) })))
}

async fn list_transactions(State(db): State<Db>, Query(query): Query<TransactionsQuery>) -> Json<Page> {
    let store = db.read().await;
    // Every seeded row falls inside any date window, so the date filter only
    // needs to be accepted.
    debug!(?query, "listing transactions");
    let items = store
        .transactions
        .iter()
        .filter(|t| query.cash_id.is_none_or(|cash_id| t.cash_id == cash_id))
        .map(|t| store.transaction_json(t))
        .collect();
    Json(paginate(items, query.page.unwrap_or(1), store.per_page))
}

async fn create_transaction(
    State(db): State<Db>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut store = db.write().await;
    let row = store.new_transaction(input).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let item = store.transaction_json(&row);
    info!(id = row.id, "transaction created");
    store.transactions.push(row);
    Ok((StatusCode::CREATED, Json(json!({ "message": "Transaction created", "item": item }))))
}

async fn update_transaction(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TransactionInput>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let index = store
        .transactions
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let mut row = store.new_transaction(input).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    row.id = id;
    let item = store.transaction_json(&row);
    store.transactions[index] = row;
    info!(id, "transaction updated");
    Ok(Json(json!({ "message": "Transaction updated", "item": item })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<Value> {
        (1..=n).map(|i| json!(i)).collect()
    }

    #[test]
    fn paginate_middle_page() {
        let page = paginate(numbers(50), 2, 10);
        assert_eq!(page.items, numbers(20)[10..].to_vec());
        assert_eq!(page.current_page, 2);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.last_page, 5);
        assert_eq!(page.total, 50);
    }

    #[test]
    fn paginate_last_page_has_no_next() {
        let page = paginate(numbers(25), 2, 20);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.next_page, None);
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn paginate_empty_is_single_page() {
        let page = paginate(Vec::new(), 1, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.last_page, 1);
        assert_eq!(page.next_page, None);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn page_zero_is_first_page() {
        let page = paginate(numbers(3), 0, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items, numbers(2));
    }

    #[test]
    fn seeded_projects_embed_clients_as_objects_or_null() {
        let store = Store::seeded();
        assert_eq!(store.projects.len(), 25);
        let with_client = store.project_json(&store.projects[0]);
        assert_eq!(with_client["client"]["id"], 1);
        assert_eq!(with_client["client"]["is_supplier"], 1);
        let without_client = store.project_json(&store.projects[2]);
        assert!(without_client["client"].is_null());
    }

    #[test]
    fn unknown_cash_register_is_rejected() {
        let store = Store::seeded();
        let input = TransactionInput {
            kind: 1,
            cash_id: 99,
            orig_amount: 1.0,
            currency_id: None,
            category_id: None,
            project_id: None,
            client_id: None,
            note: None,
            date: None,
        };
        assert!(store.new_transaction(input).is_none());
    }

    #[test]
    fn seeded_transactions_carry_cash_details() {
        let store = Store::seeded();
        assert_eq!(store.transactions.len(), 4);
        let first = &store.transactions[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.cash_amount, "1500.00");
        assert_eq!(first.cash_currency_code, "RUB");
        assert_eq!(first.project_name.as_deref(), Some("Проект 1"));
    }
}
