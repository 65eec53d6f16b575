//! Transports that execute one request/response round trip.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ApiError;

use super::{ApiRequest, Envelope};

/// Executes a single request against the integration API.
///
/// Implementations perform exactly one round trip and yield the parsed JSON
/// object on success. Any failure (network, status, body) is an [`ApiError`].
pub trait Transport: Send + Sync {
    /// Execute `request` and return the response body as a JSON object.
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Envelope, ApiError>> + Send;
}

/// reqwest-backed transport for the live service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from config.
    ///
    /// No request timeout is set; calls wait as long as the connection does.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            // TCP_NODELAY for low-latency (disable Nagle's algorithm)
            .tcp_nodelay(true)
            // Keep connections alive for reuse
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(config.http_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self), fields(endpoint = %request.endpoint))]
    async fn execute(&self, request: ApiRequest) -> Result<Envelope, ApiError> {
        let path = request.endpoint.path();
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.http.request(request.method(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received response body");

        parse_envelope(&body)
    }
}

/// Parse a response body into an envelope. Only JSON objects qualify.
pub fn parse_envelope(body: &[u8]) -> Result<Envelope, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    into_envelope(value)
}

/// Accept a JSON value as an envelope if it is an object.
pub fn into_envelope(value: Value) -> Result<Envelope, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
