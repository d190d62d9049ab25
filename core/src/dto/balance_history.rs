use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::lenient_id;
use crate::normalize::{format_date, parse_amount};
use crate::presentation::{AmountTone, ColoredAmount};

/// Kind of document that moved a client's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceSource {
    Sale,
    Receipt,
    Transaction,
    Order,
    Other(String),
}

impl BalanceSource {
    pub fn as_str(&self) -> &str {
        match self {
            BalanceSource::Sale => "sale",
            BalanceSource::Receipt => "receipt",
            BalanceSource::Transaction => "transaction",
            BalanceSource::Order => "order",
            BalanceSource::Other(other) => other,
        }
    }

    /// Human-readable label; unknown sources read as a generic operation.
    pub fn label(&self) -> &'static str {
        match self {
            BalanceSource::Sale => "Продажа",
            BalanceSource::Receipt => "Оприходование",
            BalanceSource::Transaction => "Транзакция",
            BalanceSource::Order => "Заказ",
            BalanceSource::Other(_) => "Операция",
        }
    }
}

impl From<&str> for BalanceSource {
    fn from(source: &str) -> Self {
        match source {
            "sale" => BalanceSource::Sale,
            "receipt" => BalanceSource::Receipt,
            "transaction" => BalanceSource::Transaction,
            "order" => BalanceSource::Order,
            other => BalanceSource::Other(other.to_string()),
        }
    }
}

impl Serialize for BalanceSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBalanceEntry {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub source_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub description: Option<String>,
}

/// One signed movement on a client's balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientBalanceHistory {
    pub source: BalanceSource,
    pub source_id: Option<i64>,
    pub date: String,
    pub amount: f64,
    pub description: String,
}

impl ClientBalanceHistory {
    pub fn new(source: &str, source_id: Option<i64>, date: &str, amount: f64, description: &str) -> Self {
        Self {
            source: BalanceSource::from(source),
            source_id,
            date: date.to_string(),
            amount,
            description: description.to_string(),
        }
    }

    /// Explicit sign and two decimals: `+12.50`, `-12.50`.
    pub fn formatted_amount(&self) -> String {
        let sign = if self.amount >= 0.0 { '+' } else { '-' };
        format!("{sign}{:.2}", self.amount.abs())
    }

    pub fn format_date(&self) -> String {
        format_date(&self.date)
    }

    pub fn label(&self) -> &'static str {
        self.source.label()
    }

    /// Amount with two decimals and the `m` currency suffix, toned by sign.
    pub fn colored_amount(&self) -> ColoredAmount {
        ColoredAmount {
            text: format!("{:.2}m", self.amount + 0.0),
            tone: AmountTone::of(self.amount),
        }
    }
}

impl From<RawBalanceEntry> for ClientBalanceHistory {
    fn from(raw: RawBalanceEntry) -> Self {
        Self {
            source: BalanceSource::from(raw.source.as_deref().unwrap_or_default()),
            source_id: raw.source_id,
            date: raw.date.unwrap_or_default(),
            amount: parse_amount(&raw.amount),
            description: raw.description.unwrap_or_default(),
        }
    }
}
