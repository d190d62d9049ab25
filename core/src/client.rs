//! Request dispatcher for the back-office REST API.
//!
//! # Design
//! `ApiClient` is stateless apart from its [`ApiConfig`]: it builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network. `Api` pairs it with a [`Transport`] to give controllers the
//! familiar `get`/`post`/`put` surface returning the response `data`.
//! Nothing is cached between calls; every call is exactly one round trip.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Query parameter whose `None` value is left out of the request.
pub type QueryParam<'a> = (&'a str, Option<String>);

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn build_get(&self, path: &str, query: &[QueryParam<'_>]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            query: query
                .iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
                .collect(),
            headers: self.config.headers().to_vec(),
            body: None,
        }
    }

    pub fn build_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Post, path, body)
    }

    pub fn build_put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Put, path, body)
    }

    /// Decode the `data` of a successful response. Any non-2xx status is an
    /// `HttpError`; an empty body decodes to `null`.
    pub fn parse_data(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn build_with_body<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = self.config.headers().to_vec();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method,
            url: self.url(path),
            query: Vec::new(),
            headers,
            body: Some(body),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }
}

/// Pre-configured dispatcher: an `ApiClient` plus the transport that runs it.
#[derive(Debug, Clone)]
pub struct Api<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self {
            client: ApiClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> &ApiConfig {
        self.client.config()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, path: &str, query: &[QueryParam<'_>]) -> Result<Value, ApiError> {
        self.send(self.client.build_get(path, query))
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.send(self.client.build_post(path, body)?)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.send(self.client.build_put(path, body)?)
    }

    fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, query = ?request.query, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        self.client.parse_data(response)
    }
}

#[cfg(feature = "ureq")]
impl Api<crate::transport::UreqTransport> {
    /// Dispatcher configured from the environment, see [`ApiConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env(), crate::transport::UreqTransport::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::new("http://localhost:3000"))
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_drops_absent_params() {
        let req = client().build_get(
            "/transactions",
            &[
                ("page", Some("1".to_string())),
                ("cash_id", None),
                ("date_filter_type", Some("all_time".to_string())),
            ],
        );
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/transactions");
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("date_filter_type".to_string(), "all_time".to_string()),
            ]
        );
        assert_eq!(req.header("accept"), Some("application/json"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_serializes_body() {
        let req = client().build_post("/projects", &json!({"name": "X"})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/projects");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "X"}));
    }

    #[test]
    fn build_put_targets_path() {
        let req = client().build_put("projects/7", &json!({})).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/projects/7");
    }

    #[test]
    fn configured_headers_are_sent() {
        let client = ApiClient::new(ApiConfig::new("http://localhost").with_header("authorization", "Bearer t"));
        let req = client.build_get("/projects", &[]);
        assert_eq!(req.header("authorization"), Some("Bearer t"));
    }

    #[test]
    fn parse_data_success() {
        let data = client().parse_data(ok(r#"{"id":1}"#)).unwrap();
        assert_eq!(data, json!({"id": 1}));
    }

    #[test]
    fn parse_data_empty_body_is_null() {
        assert_eq!(client().parse_data(ok("")).unwrap(), Value::Null);
    }

    #[test]
    fn parse_data_any_non_2xx_fails() {
        for status in [301, 401, 404, 422, 500] {
            let response = HttpResponse {
                status,
                headers: Vec::new(),
                body: "nope".to_string(),
            };
            let err = client().parse_data(response).unwrap_err();
            assert!(matches!(err, ApiError::HttpError { status: s, .. } if s == status));
        }
    }

    #[test]
    fn parse_data_bad_json() {
        let err = client().parse_data(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
