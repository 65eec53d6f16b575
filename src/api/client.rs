//! Client exposing the five integration API operations.
//!
//! Every operation performs exactly one round trip through its transport and
//! always returns an [`Envelope`]: the service's JSON object on success, or
//! the operation's fixed fallback shape on any failure.

use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::metrics;

use super::fallback;
use super::transport::{HttpTransport, Transport};
use super::{ApiRequest, Endpoint, Envelope};

/// Transactions requested when the caller gives no limit.
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 100;

/// Integration API client.
#[derive(Debug, Clone)]
pub struct DashboardClient<T = HttpTransport> {
    transport: T,
}

impl DashboardClient<HttpTransport> {
    /// Create a client talking to the configured service over HTTP.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> DashboardClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get the transport reference.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Service health report.
    ///
    /// Fallback: `{status: "error", message}`.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Envelope {
        self.call(ApiRequest::new(Endpoint::Health)).await
    }

    /// Most recent transactions, `limit` defaulting to
    /// [`DEFAULT_TRANSACTION_LIMIT`].
    ///
    /// Fallback: `{transactions: [], error}`.
    #[instrument(skip(self))]
    pub async fn transactions(&self, limit: Option<u32>) -> Envelope {
        let limit = limit.unwrap_or(DEFAULT_TRANSACTION_LIMIT);
        self.call(ApiRequest::new(Endpoint::Transactions).query("limit", limit))
            .await
    }

    /// Database connectivity and table state.
    ///
    /// Fallback: `{connection_test: false, error}`.
    #[instrument(skip(self))]
    pub async fn database_status(&self) -> Envelope {
        self.call(ApiRequest::new(Endpoint::DatabaseTest)).await
    }

    /// Trigger a processing run on the service. Sent as a bodiless POST.
    ///
    /// Fallback: `{status: "error", message}`.
    #[instrument(skip(self))]
    pub async fn trigger_processing(&self) -> Envelope {
        let request =
            ApiRequest::new(Endpoint::Process).header("Content-Type", "application/json");
        self.call(request).await
    }

    /// Environment descriptors of the service.
    ///
    /// Fallback: `{error}`.
    #[instrument(skip(self))]
    pub async fn environment(&self) -> Envelope {
        self.call(ApiRequest::new(Endpoint::Environment)).await
    }

    async fn call(&self, request: ApiRequest) -> Envelope {
        let endpoint = request.endpoint;
        let start = Instant::now();
        metrics::inc_calls(endpoint.label());

        let result = self.transport.execute(request).await;
        metrics::record_call_latency(start, endpoint.label());

        match result {
            Ok(body) => {
                debug!(endpoint = %endpoint, fields = body.len(), "Remote call succeeded");
                body
            }
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Remote call failed, using fallback");
                metrics::inc_fallbacks(endpoint.label());
                fallback::envelope(endpoint, &e.to_string())
            }
        }
    }
}
