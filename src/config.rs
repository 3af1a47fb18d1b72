//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    // === Statistics Dataset ===
    /// Path of the global health statistics CSV.
    #[serde(default = "default_csv_path")]
    pub health_stats_csv: String,

    // === City Health Dashboard ===
    /// Base URL of the dashboard data API.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_api_url: String,

    /// Dashboard API token.
    #[serde(default)]
    pub dashboard_api_key: Option<String>,

    /// Upstream request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_csv_path() -> String {
    "Global Health Statistics.csv".to_string()
}

fn default_dashboard_url() -> String {
    "https://www.cityhealthdashboard.com/api/data/".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
            health_stats_csv: default_csv_path(),
            dashboard_api_url: default_dashboard_url(),
            dashboard_api_key: None,
            http_timeout_ms: default_http_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check the settings the statistics service needs.
    pub fn validate_stats(&self) -> Result<(), ConfigError> {
        if self.health_stats_csv.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "HEALTH_STATS_CSV",
            });
        }

        Ok(())
    }

    /// Check the settings the dashboard proxy needs.
    pub fn validate_dashboard(&self) -> Result<(), ConfigError> {
        if self.api_key().is_none() {
            return Err(ConfigError::Missing {
                name: "DASHBOARD_API_KEY",
            });
        }

        if self.http_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "HTTP_TIMEOUT_MS",
                reason: "must be greater than zero".to_string(),
            });
        }

        self.dashboard_base_url()?;

        Ok(())
    }

    /// The dashboard API key, if set to something non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.dashboard_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Parse the dashboard base URL, guaranteeing a trailing slash so
    /// endpoint paths join underneath it.
    pub fn dashboard_base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.dashboard_api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            name: "DASHBOARD_API_URL",
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Invalid {
                name: "DASHBOARD_API_URL",
                reason: format!("unsupported scheme {}", other),
            }),
        }
    }
}
