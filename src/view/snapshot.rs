//! Data loaded for each view state.

use std::fmt;

use strum::{Display, EnumString};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::api::{DashboardClient, Envelope, Transport};

use super::summary::{DatabaseSummary, EnvironmentSummary, HealthSummary, TransactionsSummary};

const RULE: &str = "======================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------------";

/// View states of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum View {
    /// Health, database and transactions overview.
    #[default]
    Dashboard,
    /// Detailed health and environment.
    Health,
}

fn write_timestamp(f: &mut fmt::Formatter<'_>, at: OffsetDateTime) -> fmt::Result {
    let stamp = at.format(&Rfc3339).map_err(|_| fmt::Error)?;
    write!(f, "Loaded at {}", stamp)
}

/// Envelopes behind the dashboard view.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// Result of the health check.
    pub health: Envelope,
    /// Result of the database test.
    pub database: Envelope,
    /// Result of the transactions listing.
    pub transactions: Envelope,
    /// When all three calls had completed.
    pub loaded_at: OffsetDateTime,
}

impl DashboardSnapshot {
    /// Issue the three calls concurrently and collect their envelopes.
    #[instrument(skip(client))]
    pub async fn load<T: Transport>(client: &DashboardClient<T>, limit: Option<u32>) -> Self {
        let (health, database, transactions) = tokio::join!(
            client.health(),
            client.database_status(),
            client.transactions(limit),
        );

        info!("Dashboard snapshot loaded");

        Self {
            health,
            database,
            transactions,
            loaded_at: OffsetDateTime::now_utc(),
        }
    }

    /// Typed reading of the health envelope.
    pub fn health_summary(&self) -> HealthSummary {
        HealthSummary::from_envelope(&self.health)
    }

    /// Typed reading of the database envelope.
    pub fn database_summary(&self) -> DatabaseSummary {
        DatabaseSummary::from_envelope(&self.database)
    }

    /// Typed reading of the transactions envelope.
    pub fn transactions_summary(&self) -> TransactionsSummary {
        TransactionsSummary::from_envelope(&self.transactions)
    }
}

impl fmt::Display for DashboardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SAP INTEGRATION - DASHBOARD")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Service:")?;
        writeln!(f, "{}", self.health_summary())?;
        writeln!(f, "{}", THIN_RULE)?;
        writeln!(f, "Database:")?;
        writeln!(f, "{}", self.database_summary())?;
        writeln!(f, "{}", THIN_RULE)?;
        writeln!(f, "Transactions:")?;
        writeln!(f, "{}", self.transactions_summary())?;
        writeln!(f, "{}", RULE)?;
        write_timestamp(f, self.loaded_at)
    }
}

/// Envelopes behind the health view.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    /// Result of the health check.
    pub health: Envelope,
    /// Result of the environment call.
    pub environment: Envelope,
    /// When both calls had completed.
    pub loaded_at: OffsetDateTime,
}

impl HealthSnapshot {
    /// Issue health and environment calls concurrently.
    #[instrument(skip(client))]
    pub async fn load<T: Transport>(client: &DashboardClient<T>) -> Self {
        let (health, environment) = tokio::join!(client.health(), client.environment());

        info!("Health snapshot loaded");

        Self {
            health,
            environment,
            loaded_at: OffsetDateTime::now_utc(),
        }
    }

    /// Typed reading of the health envelope.
    pub fn health_summary(&self) -> HealthSummary {
        HealthSummary::from_envelope(&self.health)
    }

    /// Typed reading of the environment envelope.
    pub fn environment_summary(&self) -> EnvironmentSummary {
        EnvironmentSummary::from_envelope(&self.environment)
    }
}

impl fmt::Display for HealthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SAP INTEGRATION - HEALTH")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Service:")?;
        writeln!(f, "{}", self.health_summary())?;
        writeln!(f, "{}", THIN_RULE)?;
        writeln!(f, "Environment:")?;
        writeln!(f, "{}", self.environment_summary())?;
        writeln!(f, "{}", RULE)?;
        write_timestamp(f, self.loaded_at)
    }
}
