//! The fixed endpoint set of the integration API.

use reqwest::Method;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Remote endpoints the access layer can call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Endpoint {
    /// Service health report.
    Health,
    /// Most recent raw transactions.
    Transactions,
    /// Database connectivity and table state.
    DatabaseTest,
    /// Trigger a processing run (state-changing).
    Process,
    /// Environment descriptors of the service.
    Environment,
}

impl Endpoint {
    /// Path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Health => "/api/health",
            Endpoint::Transactions => "/api/transactions-raw",
            Endpoint::DatabaseTest => "/api/database-test",
            Endpoint::Process => "/api/process",
            Endpoint::Environment => "/api/environment",
        }
    }

    /// HTTP method used for the endpoint.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Process => Method::POST,
            _ => Method::GET,
        }
    }

    /// Static label for logs and metrics.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// One request the access layer wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(&'static str, &'static str)>,
}

impl ApiRequest {
    /// Create a request with no query and no headers.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a header.
    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    /// HTTP method of the target endpoint.
    pub fn method(&self) -> Method {
        self.endpoint.method()
    }

    /// Look up a query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header value by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}
