//! Status dashboard client for the SAP integration API.
//!
//! The integration service exposes five status and control endpoints. This
//! library calls them and normalizes every outcome into a result envelope:
//! the service's JSON object on success, or a fixed fallback shape when the
//! call fails, so callers never handle transport errors themselves.
//!
//! ```text
//! GET  /api/health              -> {status, database, data, ...}   | {status: "error", message}
//! GET  /api/transactions-raw    -> {transactions: [...], ...}      | {transactions: [], error}
//! GET  /api/database-test       -> {connection_test, tables, ...}  | {connection_test: false, error}
//! POST /api/process             -> {status, message, ...}          | {status: "error", message}
//! GET  /api/environment         -> {environment_variables, ...}    | {error}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types
//! - [`api`]: Endpoints, transports, fallbacks and the client
//! - [`view`]: Dashboard and health view data and text rendering
//! - [`metrics`]: Call latency and fallback metrics

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
#[deny(missing_docs)]
pub mod view;

pub use api::{DashboardClient, Envelope};
pub use config::Config;
pub use error::{ApiError, DashboardError, Result};
