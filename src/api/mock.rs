//! Scripted transport for unit testing.
//!
//! This module provides a transport that answers from per-endpoint
//! scripts without making real network requests, and records every
//! request it is asked to execute.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::ApiError;

use super::transport::{into_envelope, Transport};
use super::{ApiRequest, Endpoint, Envelope};

/// Scripted answer for one endpoint.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Respond with this JSON body. Non-object bodies fail as parse errors.
    Json(Value),
    /// Fail with a network error carrying this message.
    Fail(String),
}

/// Configuration for mock transport behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock transport for testing.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Mock configuration.
    config: MockConfig,
    /// Scripted responses by endpoint.
    responses: Arc<Mutex<HashMap<Endpoint, MockResponse>>>,
    /// Requests executed so far, in order.
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Script a JSON body for an endpoint.
    pub fn respond(self, endpoint: Endpoint, body: Value) -> Self {
        self.set_response(endpoint, MockResponse::Json(body));
        self
    }

    /// Script a network failure for an endpoint.
    pub fn fail(self, endpoint: Endpoint, message: impl Into<String>) -> Self {
        self.set_response(endpoint, MockResponse::Fail(message.into()));
        self
    }

    /// Replace the script for an endpoint.
    pub fn set_response(&self, endpoint: Endpoint, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(endpoint, response);
    }

    /// Requests executed so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent request, if any.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Clear all scripts and recorded requests.
    pub fn clear(&self) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn answer(&self, request: ApiRequest) -> Result<Envelope, ApiError> {
        let endpoint = request.endpoint;
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let scripted = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&endpoint)
            .cloned();

        match scripted {
            Some(MockResponse::Json(body)) => into_envelope(body),
            Some(MockResponse::Fail(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Network(format!(
                "no mock response for {}",
                endpoint.path()
            ))),
        }
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Envelope, ApiError> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        self.answer(request)
    }
}
