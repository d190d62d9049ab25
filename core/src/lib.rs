//! Data-access layer for the back-office REST API.
//!
//! # Overview
//! Controllers call the backend through a pre-configured dispatcher, then
//! map raw JSON into typed DTOs (projects, transactions, clients, sale rows,
//! warehouses). DTOs normalize the backend's loose encodings on construction
//! and expose pure formatting helpers for the UI.
//!
//! # Design
//! - `ApiClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values (host-does-IO pattern). A [`Transport`] performs
//!   the round trip; `UreqTransport` is the default one.
//! - Controllers are free-function modules over [`Api`], one per resource.
//! - Formatting methods return rendering-agnostic descriptors from
//!   [`presentation`]; [`render::html`] produces the legacy markup.
//! - Every request failure is logged via `tracing` and returned unchanged.
//!
//! ```no_run
//! use backoffice_core::{controllers::projects, Api};
//!
//! # fn main() -> Result<(), backoffice_core::ApiError> {
//! let api = Api::from_env();
//! let page = projects::get_items(&api, Some(2))?;
//! for project in &page.items {
//!     println!("{} {}", project.name, project.format_date());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod http;
pub mod normalize;
pub mod presentation;
pub mod render;
pub mod transport;

pub use client::{Api, ApiClient};
pub use config::ApiConfig;
pub use controllers::transactions::TransactionQuery;
pub use dto::{
    BalanceSource, Client, ClientBalanceHistory, ClientEmail, ClientPhone, ClientType, PaginatedResponse,
    ProductRecord, Project, ProjectPayload, SaleProduct, Transaction, TransactionPayload, Warehouse,
};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::is_truthy_flag;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::Transport;
