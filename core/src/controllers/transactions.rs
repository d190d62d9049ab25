//! `/transactions`.

use serde_json::Value;
use tracing::{debug, error};

use super::decode;
use crate::client::Api;
use crate::dto::{PaginatedResponse, RawPage, RawTransaction, Transaction, TransactionPayload};
use crate::error::ApiError;
use crate::transport::Transport;

const PATH: &str = "/transactions";

/// Date filter applied when the caller does not pick one.
pub const DEFAULT_DATE_FILTER: &str = "all_time";

/// Filters for a transaction listing. The default is page 1 of every cash
/// register over all time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub page: u32,
    pub cash_id: Option<i64>,
    pub date_filter_type: String,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            cash_id: None,
            date_filter_type: DEFAULT_DATE_FILTER.to_string(),
        }
    }
}

impl TransactionQuery {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_cash_id(mut self, cash_id: i64) -> Self {
        self.cash_id = Some(cash_id);
        self
    }

    pub fn with_date_filter_type(mut self, date_filter_type: &str) -> Self {
        self.date_filter_type = date_filter_type.to_string();
        self
    }
}

pub fn get_items<T: Transport>(
    api: &Api<T>,
    query: &TransactionQuery,
) -> Result<PaginatedResponse<Transaction>, ApiError> {
    fetch_page(api, query).inspect_err(|e| error!(error = %e, ?query, "failed to fetch transactions"))
}

pub fn store_item<T: Transport>(api: &Api<T>, item: &TransactionPayload) -> Result<Value, ApiError> {
    api.post(PATH, item)
        .inspect_err(|e| error!(error = %e, "failed to create transaction"))
}

pub fn update_item<T: Transport>(api: &Api<T>, id: i64, item: &TransactionPayload) -> Result<Value, ApiError> {
    api.put(&format!("{PATH}/{id}"), item)
        .inspect_err(|e| error!(error = %e, id, "failed to update transaction"))
}

fn fetch_page<T: Transport>(api: &Api<T>, query: &TransactionQuery) -> Result<PaginatedResponse<Transaction>, ApiError> {
    let params = [
        ("page", Some(query.page.to_string())),
        ("cash_id", query.cash_id.map(|id| id.to_string())),
        ("date_filter_type", Some(query.date_filter_type.clone())),
    ];
    let data = api.get(PATH, &params)?;
    debug!(%data, "transactions page");
    let raw: RawPage<RawTransaction> = decode(data)?;
    raw.try_map(Transaction::try_from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_first_page_all_time() {
        let query = TransactionQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.cash_id, None);
        assert_eq!(query.date_filter_type, "all_time");
    }

    #[test]
    fn builder_overrides_fields() {
        let query = TransactionQuery::default()
            .with_page(3)
            .with_cash_id(7)
            .with_date_filter_type("this_month");
        assert_eq!(query.page, 3);
        assert_eq!(query.cash_id, Some(7));
        assert_eq!(query.date_filter_type, "this_month");
    }
}
