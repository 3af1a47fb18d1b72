//! City Health Dashboard API client.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::types::{Disease, MetricId, GEO_LEVEL_CITY};
use crate::config::Config;
use crate::error::{AppError, ConfigError, DashboardError};
use crate::metrics;

/// Query parameters sent upstream.
pub type QueryParams = Vec<(&'static str, String)>;

/// City Health Dashboard REST client.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// API token, sent as bearer and as `token` parameter.
    api_key: String,
}

impl DashboardClient {
    /// Create a client from validated configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let api_key = config
            .api_key()
            .ok_or(ConfigError::Missing {
                name: "DASHBOARD_API_KEY",
            })?
            .to_string();
        let base_url = config.dashboard_base_url()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_secs(5))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(DashboardError::from)?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `{base}{endpoint}` and return the upstream JSON unchanged.
    #[instrument(skip(self, params))]
    pub async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<Value, DashboardError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| DashboardError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        metrics::inc_upstream_requests(endpoint);
        let start = Instant::now();

        let result = self.send(url, params).await;
        metrics::record_upstream_latency(start, endpoint);

        if let Err(e) = &result {
            metrics::inc_upstream_failures(endpoint);
            warn!(error = %e, "Dashboard request failed");
        }

        result
    }

    async fn send(&self, url: Url, params: &QueryParams) -> Result<Value, DashboardError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await?;
        debug!(status = status.as_u16(), "Dashboard request succeeded");
        Ok(data)
    }

    /// Parameters identifying a city. Spaces in the name become `+`.
    pub fn city_params(&self, city_name: &str) -> QueryParams {
        vec![
            ("token", self.api_key.clone()),
            ("geo_name", city_name.replace(' ', "+")),
            ("geo_level", GEO_LEVEL_CITY.to_string()),
        ]
    }

    /// One metric series for a city.
    pub async fn metric_data(&self, metric: MetricId, city_name: &str) -> Result<Value, DashboardError> {
        let params = self.city_params(city_name);
        self.fetch(&metric.endpoint(), &params).await
    }

    /// Disease statistics for a city.
    pub async fn disease_statistics(&self, city_name: &str) -> Result<Value, DashboardError> {
        self.metric_data(MetricId::DISEASE_STATISTICS, city_name).await
    }

    /// Vaccination rates for a city.
    pub async fn vaccination_rates(&self, city_name: &str) -> Result<Value, DashboardError> {
        self.metric_data(MetricId::VACCINATION_RATES, city_name).await
    }

    /// Historical trend data for a city and disease.
    pub async fn trend(&self, disease: Disease, city_name: &str) -> Result<Value, DashboardError> {
        self.metric_data(disease.metric(), city_name).await
    }

    /// Geographies within a state.
    pub async fn geographies(
        &self,
        state_abbr: &str,
        census_parent_shape_year: &str,
    ) -> Result<Value, DashboardError> {
        let params = vec![
            ("token", self.api_key.clone()),
            ("state_abbr", state_abbr.to_string()),
            ("census_parent_shape_year", census_parent_shape_year.to_string()),
        ];
        self.fetch("geographies", &params).await
    }
}
