//! Connection settings shared by every request.
//!
//! `ApiConfig` is the "pre-configured" part of the dispatcher: the backend
//! base URL, the headers sent with every call, and the base URL that stored
//! assets (product images) are served from.

use std::env;

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "BACKOFFICE_API_URL";
/// Environment variable holding the asset base URL.
pub const ASSET_URL_VAR: &str = "BACKOFFICE_ASSET_URL";
/// Base URL used when [`API_URL_VAR`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    asset_base_url: String,
    headers: Vec<(String, String)>,
}

impl ApiConfig {
    /// Config for `base_url`; assets are served from the same host.
    pub fn new(base_url: &str) -> Self {
        let base_url = trim_url(base_url);
        Self {
            asset_base_url: base_url.clone(),
            base_url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Read [`API_URL_VAR`] and [`ASSET_URL_VAR`], falling back to
    /// [`DEFAULT_API_URL`] and the API URL respectively.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let config = Self::new(&base_url);
        match env::var(ASSET_URL_VAR) {
            Ok(asset_url) => config.with_asset_base_url(&asset_url),
            Err(_) => config,
        }
    }

    pub fn with_asset_base_url(mut self, asset_base_url: &str) -> Self {
        self.asset_base_url = trim_url(asset_base_url);
        self
    }

    /// Add a header sent with every request, replacing any header of the same
    /// name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn trim_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
