//! The two view states of the dashboard and their data.

pub mod snapshot;
pub mod summary;

pub use snapshot::{DashboardSnapshot, HealthSnapshot, View};
pub use summary::{
    DatabaseSummary, EnvironmentSummary, HealthSummary, ProcessingSummary, TableStatus,
    TransactionsSummary,
};
