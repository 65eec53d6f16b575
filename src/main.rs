//! Integration dashboard entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use integration_dashboard::api::{DashboardClient, Envelope};
use integration_dashboard::config::Config;
use integration_dashboard::error::DashboardError;
use integration_dashboard::metrics;
use integration_dashboard::view::{DashboardSnapshot, HealthSnapshot, ProcessingSummary, View};

/// Status dashboard for the SAP integration API.
#[derive(Parser, Debug)]
#[command(name = "integration-dashboard")]
#[command(about = "Health, database and transaction status of the SAP integration API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true, env = "VERBOSE")]
    verbose: bool,

    /// Base URL of the integration API (overrides INTEGRATION_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a view: dashboard (default) or health.
    Show {
        #[arg(default_value_t = View::Dashboard)]
        view: View,

        /// Number of transactions to list.
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print the raw health envelope.
    Health,

    /// Print the raw transactions envelope.
    Transactions {
        /// Number of transactions to list.
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print the raw database status envelope.
    Database,

    /// Trigger a processing run and print the outcome.
    Process {
        /// Print the raw envelope instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Print the raw environment envelope.
    Environment,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, envelopes to stdout
    let filter = if args.verbose {
        EnvFilter::new("integration_dashboard=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    metrics::init_metrics();

    let config = load_config(args.api_url)?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Show { view, limit }) => cmd_show(&config, view, limit).await,
        Some(Command::Health) => {
            let client = DashboardClient::from_config(&config)?;
            print_envelope(&client.health().await)
        }
        Some(Command::Transactions { limit }) => {
            let client = DashboardClient::from_config(&config)?;
            let limit = limit.unwrap_or(config.transactions_limit);
            print_envelope(&client.transactions(Some(limit)).await)
        }
        Some(Command::Database) => {
            let client = DashboardClient::from_config(&config)?;
            print_envelope(&client.database_status().await)
        }
        Some(Command::Process { json }) => cmd_process(&config, json).await,
        Some(Command::Environment) => {
            let client = DashboardClient::from_config(&config)?;
            print_envelope(&client.environment().await)
        }
        None => cmd_show(&config, View::Dashboard, None).await,
    }
}

/// Load and validate configuration, applying the CLI override.
fn load_config(api_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        DashboardError::from(e)
    })?;

    if let Some(url) = api_url {
        config.integration_api_url = url;
    }

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        DashboardError::InvalidConfig(e)
    })?;

    info!(api_url = %config.base_url(), "Configuration loaded");
    Ok(config)
}

fn print_envelope(envelope: &Envelope) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(envelope).map_err(DashboardError::from)?;
    println!("{}", text);
    Ok(())
}

/// Render one of the two views.
async fn cmd_show(config: &Config, view: View, limit: Option<u32>) -> anyhow::Result<()> {
    let client = DashboardClient::from_config(config)?;

    match view {
        View::Dashboard => {
            let limit = limit.unwrap_or(config.transactions_limit);
            let snapshot = DashboardSnapshot::load(&client, Some(limit)).await;
            println!("{}", snapshot);
        }
        View::Health => {
            let snapshot = HealthSnapshot::load(&client).await;
            println!("{}", snapshot);
        }
    }

    Ok(())
}

/// Trigger processing on the service.
async fn cmd_process(config: &Config, json: bool) -> anyhow::Result<()> {
    let client = DashboardClient::from_config(config)?;

    info!("Triggering processing run...");
    let envelope = client.trigger_processing().await;

    if json {
        return print_envelope(&envelope);
    }

    println!("======================================================================");
    println!("SAP INTEGRATION - PROCESSING");
    println!("======================================================================");
    println!("{}", ProcessingSummary::from_envelope(&envelope));
    println!("======================================================================");

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SAP INTEGRATION - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Creating HTTP client... ");
    match DashboardClient::from_config(config) {
        Ok(_) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("HTTP client creation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  API URL: {}", config.base_url());
    println!("  Transactions Limit: {}", config.transactions_limit);
    println!("  HTTP Pool Size: {}", config.http_pool_size);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn verbose_flag_reads_verbose_env() {
        let command = Args::command();
        let verbose = command
            .get_arguments()
            .find(|arg| arg.get_id() == "verbose")
            .unwrap();

        assert_eq!(verbose.get_env(), Some(std::ffi::OsStr::new("VERBOSE")));
    }

    #[test]
    fn verbose_flag_is_global() {
        let args = Args::try_parse_from(["integration-dashboard", "health", "--verbose"]).unwrap();

        assert!(args.verbose);
        assert!(matches!(args.command, Some(Command::Health)));
    }
}
