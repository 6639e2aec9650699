//! Minimal HTTP transport shared by the dev-node and platform clients

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use types::TransportError;

/// HTTP verbs supported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP client with a fixed header set
#[derive(Debug, Clone)]
pub struct HttpTransport {
    service: String,
    http_client: Client,
    headers: HeaderMap,
    json_body: bool,
}

impl HttpMethod {
    fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl RawResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpTransport {
    /// Create a transport for `service`, sending `headers` on every request
    pub fn new(
        service: impl Into<String>,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let service = service.into();

        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| TransportError::InvalidRequest {
                service: service.clone(),
                message: format!("invalid header name {:?}: {}", key, e),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| TransportError::InvalidRequest {
                service: service.clone(),
                message: format!("invalid value for header {:?}: {}", key, e),
            })?;
            header_map.insert(name, value);
        }

        let json_body = header_map
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);

        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hardhat-simulator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::InvalidRequest {
                service: service.clone(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            service,
            http_client,
            headers: header_map,
            json_body,
        })
    }

    /// Name used in logs and errors
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Whether POST/PUT bodies are sent as JSON rather than form encoded
    pub fn sends_json(&self) -> bool {
        self.json_body
    }

    /// Issue a request and return the body for any HTTP status.
    ///
    /// POST and PUT carry `params` as the body; GET and DELETE carry them as a
    /// query string.
    pub async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<&Value>,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http_client
            .request(method.as_method(), url)
            .headers(self.headers.clone());

        if let Some(params) = params {
            builder = match method {
                HttpMethod::Post | HttpMethod::Put if self.json_body => builder.json(params),
                HttpMethod::Post | HttpMethod::Put => builder.form(params),
                HttpMethod::Get | HttpMethod::Delete => builder.query(params),
            };
        }

        tracing::debug!(service = %self.service, method = ?method, url = %url, "Sending request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    service: self.service.clone(),
                }
            } else if e.is_builder() {
                TransportError::InvalidRequest {
                    service: self.service.clone(),
                    message: e.to_string(),
                }
            } else {
                TransportError::Connection {
                    service: self.service.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Body {
            service: self.service.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(service = %self.service, status = status, body_len = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, body_string, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn json_headers() -> BTreeMap<String, String> {
        BTreeMap::from([("content-type".to_string(), "application/json".to_string())])
    }

    fn transport(headers: &BTreeMap<String, String>) -> HttpTransport {
        HttpTransport::new("test", headers, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"blockNumber": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport(&json_headers());
        assert!(transport.sends_json());

        let url = format!("{}/rpc", mock_server.uri());
        let response = transport
            .request(HttpMethod::Post, &url, Some(&json!({"blockNumber": 42})))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn test_post_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/form"))
            .and(body_string("blockNumber=42"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let headers = BTreeMap::from([("x-api-key".to_string(), "local".to_string())]);
        let transport = transport(&headers);
        assert!(!transport.sends_json());

        let url = format!("{}/form", mock_server.uri());
        tokio_test::assert_ok!(
            transport
                .request(HttpMethod::Put, &url, Some(&json!({"blockNumber": 42})))
                .await
        );
    }

    #[tokio::test]
    async fn test_get_sends_query_and_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status"))
            .and(query_param("verbose", "true"))
            .and(header("authorization", "Bearer local"))
            .respond_with(ResponseTemplate::new(200).set_body_string("up"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = json_headers();
        headers.insert("authorization".to_string(), "Bearer local".to_string());
        let transport = transport(&headers);

        let url = format!("{}/status", mock_server.uri());
        let response = transport
            .request(HttpMethod::Get, &url, Some(&json!({"verbose": "true"})))
            .await
            .unwrap();
        assert_eq!(response.body, "up");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let transport = transport(&json_headers());
        let response = transport
            .request(HttpMethod::Delete, &mock_server.uri(), None)
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let transport = transport(&json_headers());
        let result = transport
            .request(HttpMethod::Post, "http://127.0.0.1:1/", Some(&json!({})))
            .await;

        assert!(matches!(result, Err(TransportError::Connection { .. })));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let headers = BTreeMap::from([("bad header".to_string(), "x".to_string())]);
        let result = HttpTransport::new("test", &headers, Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidRequest { .. })));
    }
}
