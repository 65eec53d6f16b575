//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

/// Production base address of the integration API.
pub const DEFAULT_API_URL: &str =
    "https://app-sap-integration-api-h7hwc9fwaugghnce.germanywestcentral-01.azurewebsites.net";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Remote Service ===
    /// Base URL of the integration API.
    #[serde(default = "default_api_url")]
    pub integration_api_url: String,

    /// Number of transactions requested by the dashboard view.
    #[serde(default = "default_transactions_limit")]
    pub transactions_limit: u32,

    /// Idle connections kept per host.
    #[serde(default = "default_pool_size")]
    pub http_pool_size: usize,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_transactions_limit() -> u32 {
    crate::api::DEFAULT_TRANSACTION_LIMIT
}

fn default_pool_size() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            integration_api_url: default_api_url(),
            transactions_limit: default_transactions_limit(),
            http_pool_size: default_pool_size(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.integration_api_url)
            .map_err(|e| format!("INTEGRATION_API_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "INTEGRATION_API_URL must use http or https, got {}",
                url.scheme()
            ));
        }

        if self.transactions_limit == 0 {
            return Err("TRANSACTIONS_LIMIT must be at least 1".to_string());
        }

        Ok(())
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.integration_api_url.trim_end_matches('/')
    }
}
