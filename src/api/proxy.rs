//! Dashboard proxy handlers: City Health Dashboard JSON passthrough.

use std::str::FromStr;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument};
use utoipa::IntoParams;

use super::handlers::DashboardState;
use crate::dashboard::types::DEFAULT_CENSUS_SHAPE_YEAR;
use crate::dashboard::{assess, DashboardClient, Disease, RiskAssessment};
use crate::error::ApiError;

/// Greeting returned from the proxy root.
pub const WELCOME: &str = "Welcome to the Public Health Data API Program!";

/// Detail returned for an unknown trend disease.
pub const INVALID_DISEASE: &str = "Invalid disease name";

/// Cities fetched at once by `/compare`; each city issues two upstream calls.
pub const COMPARE_CONCURRENCY: usize = 8;

/// Query naming a single city.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// City name, e.g. "New York"
    pub city_name: String,
}

/// Query for `/trend-analysis`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendQuery {
    /// City name
    pub city_name: String,
    /// Disease: "flu" or "covid"
    pub disease: String,
}

/// Query for `/compare`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareQuery {
    /// Comma-separated city names
    pub cities: String,
    /// Accepted for compatibility; every city gets disease and vaccination data
    #[serde(default)]
    pub metrics: Option<String>,
}

/// Query for `/geographies`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GeographiesQuery {
    /// Two-letter state abbreviation
    pub state_abbr: String,
    /// Census shape year
    #[serde(default = "default_shape_year")]
    pub census_parent_shape_year: String,
}

fn default_shape_year() -> String {
    DEFAULT_CENSUS_SHAPE_YEAR.to_string()
}

/// Greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "dashboard",
    responses(
        (status = 200, description = "Greeting", body = Vec<String>)
    )
)]
pub async fn index() -> Json<Value> {
    Json(json!([WELCOME]))
}

/// City-level disease statistics.
#[utoipa::path(
    get,
    path = "/disease-statistics",
    tag = "dashboard",
    params(CityQuery),
    responses(
        (status = 200, description = "Upstream metric payload"),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn disease_statistics(
    State(state): State<DashboardState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let data = state.client.disease_statistics(&params.city_name).await?;
    Ok(Json(data))
}

/// City-level vaccination rates.
#[utoipa::path(
    get,
    path = "/vaccination-rates",
    tag = "dashboard",
    params(CityQuery),
    responses(
        (status = 200, description = "Upstream metric payload"),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn vaccination_rates(
    State(state): State<DashboardState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let data = state.client.vaccination_rates(&params.city_name).await?;
    Ok(Json(data))
}

/// Historical trend data for a city and disease.
#[utoipa::path(
    get,
    path = "/trend-analysis",
    tag = "dashboard",
    params(TrendQuery),
    responses(
        (status = 200, description = "Upstream metric payload"),
        (status = 400, description = "Unknown disease", body = crate::error::ErrorBody),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn trend_analysis(
    State(state): State<DashboardState>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let disease = Disease::from_str(&params.disease)
        .map_err(|_| ApiError::BadRequest(INVALID_DISEASE.to_string()))?;

    let data = state.client.trend(disease, &params.city_name).await?;
    Ok(Json(data))
}

/// Disease and vaccination data side by side for several cities.
///
/// Per-city upstream failures are reported inline; the response is always 200.
#[utoipa::path(
    get,
    path = "/compare",
    tag = "dashboard",
    params(CompareQuery),
    responses(
        (status = 200, description = "Object keyed by city")
    )
)]
#[instrument(skip(state, query))]
pub async fn compare(
    State(state): State<DashboardState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    if let Some(metrics) = &params.metrics {
        debug!(metrics = %metrics, "Ignoring metrics selection");
    }

    let cities: Vec<&str> = params.cities.split(',').collect();
    let lookups: Vec<_> = cities.iter().map(|city| compare_city(&state.client, city)).collect();
    let entries: Vec<Value> = stream::iter(lookups)
        .buffered(COMPARE_CONCURRENCY)
        .collect()
        .await;

    let mut comparison = Map::new();
    for (city, entry) in cities.into_iter().zip(entries) {
        comparison.insert(city.to_string(), entry);
    }

    info!(cities = comparison.len(), "Compared cities");
    Ok(Json(Value::Object(comparison)))
}

async fn compare_city(client: &DashboardClient, city: &str) -> Value {
    let result = tokio::try_join!(
        client.disease_statistics(city),
        client.vaccination_rates(city),
    );

    match result {
        Ok((disease_data, vaccination_data)) => json!({
            "disease_data": disease_data,
            "vaccination_data": vaccination_data,
        }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Risk level from disease cases and vaccination rate.
#[utoipa::path(
    get,
    path = "/risk-assessment",
    tag = "dashboard",
    params(CityQuery),
    responses(
        (status = 200, description = "Risk label for the city", body = RiskAssessment),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn risk_assessment(
    State(state): State<DashboardState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Query(params) = query?;
    let city = params.city_name.as_str();

    let (disease_data, vaccination_data) = tokio::try_join!(
        state.client.disease_statistics(city),
        state.client.vaccination_rates(city),
    )?;

    let assessment = assess(city, &disease_data, &vaccination_data);
    info!(city = %city, risk_level = %assessment.risk_level, "Assessed risk");
    Ok(Json(assessment))
}

/// Geographies for a state.
#[utoipa::path(
    get,
    path = "/geographies",
    tag = "dashboard",
    params(GeographiesQuery),
    responses(
        (status = 200, description = "Upstream geographies payload"),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn geographies(
    State(state): State<DashboardState>,
    query: Result<Query<GeographiesQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let data = state
        .client
        .geographies(&params.state_abbr, &params.census_parent_shape_year)
        .await?;
    Ok(Json(data))
}
