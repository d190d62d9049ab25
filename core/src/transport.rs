//! The I/O seam between the request builder and the network.
//!
//! # Design
//! Everything above this trait is deterministic: requests and responses are
//! plain data. A `Transport` executes exactly one round trip per call and
//! blocks until it completes. Timeouts, retries and connection reuse belong
//! to the implementation, never to the controllers.
//!
//! `UreqTransport` is the stock implementation. It disables ureq's
//! status-code-as-error behavior so 4xx/5xx responses come back as data and
//! status interpretation stays in [`ApiClient::parse_data`](crate::client::ApiClient::parse_data).

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::time::Duration;

    use tracing::trace;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a shared `ureq::Agent`.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::build(None)
        }

        /// Transport whose requests fail with `ApiError::Transport` once
        /// `timeout` has elapsed.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::build(Some(timeout))
        }

        fn build(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            trace!(method = request.method.as_str(), url = %request.url, "executing request");

            let result = match request.method {
                HttpMethod::Get => decorate(self.agent.get(&request.url), &request).call(),
                HttpMethod::Post => {
                    let builder = decorate(self.agent.post(&request.url), &request);
                    match &request.body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
                HttpMethod::Put => {
                    let builder = decorate(self.agent.put(&request.url), &request);
                    match &request.body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;

    struct Recording {
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Recording {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            Ok(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    #[test]
    fn references_are_transports() {
        let transport = Recording {
            seen: RefCell::new(Vec::new()),
        };
        let by_ref: &dyn Transport = &transport;
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/projects".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        };
        let response = (&by_ref).execute(request.clone()).unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(transport.seen.borrow().as_slice(), &[request]);
    }

    #[cfg(feature = "ureq")]
    #[test]
    fn unreachable_host_is_a_transport_error() {
        let transport = UreqTransport::with_timeout(std::time::Duration::from_secs(2));
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/projects".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(request).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
