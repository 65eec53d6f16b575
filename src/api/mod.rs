//! Access layer for the integration API.
//!
//! This module handles:
//! - The fixed endpoint set and request description
//! - Transports (reqwest-backed and scripted mock)
//! - Fallback envelopes for failed calls
//! - The client exposing the five operations

pub mod client;
pub mod endpoint;
pub mod fallback;
pub mod mock;
pub mod transport;

/// Field mapping returned by every operation, from success or fallback.
pub type Envelope = serde_json::Map<String, serde_json::Value>;

pub use client::{DashboardClient, DEFAULT_TRANSACTION_LIMIT};
pub use endpoint::{ApiRequest, Endpoint};
pub use mock::{MockConfig, MockResponse, MockTransport};
pub use transport::{HttpTransport, Transport};
