//! Rendering-agnostic descriptors produced by DTO formatting methods.
//!
//! DTOs describe *what* to show (a company badge, an inactive status, a
//! negative amount); [`render::html`](crate::render::html) or any other front
//! end decides *how*. Titles are the user-facing labels of the back office.

use serde::Serialize;

/// Badge shown next to a client's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientBadge {
    Company,
    Individual,
    Conflict,
    Supplier,
}

impl ClientBadge {
    pub fn title(&self) -> &'static str {
        match self {
            ClientBadge::Company => "Компания",
            ClientBadge::Individual => "Индивидульный клиент",
            ClientBadge::Conflict => "Проблемный клиент",
            ClientBadge::Supplier => "Поставщик",
        }
    }
}

/// Active/inactive marker for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBadge {
    Active,
    Inactive,
}

impl StatusBadge {
    pub fn title(&self) -> &'static str {
        match self {
            StatusBadge::Active => "Активен",
            StatusBadge::Inactive => "Неактивен",
        }
    }
}

impl From<bool> for StatusBadge {
    fn from(active: bool) -> Self {
        if active {
            StatusBadge::Active
        } else {
            StatusBadge::Inactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountTone {
    Positive,
    Negative,
}

impl AmountTone {
    /// Zero counts as positive; NaN does not.
    pub fn of(amount: f64) -> Self {
        if amount >= 0.0 {
            AmountTone::Positive
        } else {
            AmountTone::Negative
        }
    }
}

/// An amount already formatted for display, plus the tone to color it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColoredAmount {
    pub text: String,
    pub tone: AmountTone,
}
