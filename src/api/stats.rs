//! Statistics service handlers: HTML views over the CSV dataset.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::{de, Deserialize, Deserializer};
use tracing::{info, instrument};
use utoipa::IntoParams;

use super::handlers::StatsState;
use super::pages;
use crate::dataset::{aggregate_by_disease, raw_table, IndexedRecord, Table};
use crate::error::ApiError;
use crate::metrics;

/// Detail returned when a single-country query matches nothing.
pub const COUNTRY_NOT_FOUND: &str = "Country or year not found.";
/// Detail returned when either side of a comparison matches nothing.
pub const COUNTRIES_NOT_FOUND: &str = "Countries or year not found.";

/// Query for `/health_data`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthDataQuery {
    /// Country to retrieve data for
    pub country: String,
    /// Year to retrieve data for
    pub year: i32,
    /// Aggregate data by disease?
    #[serde(default = "default_aggregate", deserialize_with = "deserialize_flag")]
    pub aggregate: bool,
}

/// Query for `/health_compare`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthCompareQuery {
    /// First country to compare
    pub country1: String,
    /// Second country to compare
    pub country2: String,
    /// Year to compare
    pub year: i32,
    /// Aggregate data by disease?
    #[serde(default = "default_aggregate", deserialize_with = "deserialize_flag")]
    pub aggregate: bool,
}

fn default_aggregate() -> bool {
    true
}

/// Parse a permissive boolean query value.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid boolean value `{}`", raw)))
}

fn build_table(rows: &[IndexedRecord<'_>], aggregate: bool) -> Table {
    if aggregate {
        aggregate_by_disease(rows)
    } else {
        raw_table(rows)
    }
}

/// Welcome page.
#[utoipa::path(
    get,
    path = "/",
    tag = "stats",
    responses(
        (status = 200, description = "Welcome page with usage instructions", body = String, content_type = "text/html")
    )
)]
pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

/// Returns selected data for a specified country and year, with optional aggregation.
#[utoipa::path(
    get,
    path = "/health_data",
    tag = "stats",
    params(HealthDataQuery),
    responses(
        (status = 200, description = "HTML table of matching rows", body = String, content_type = "text/html"),
        (status = 404, description = "Country or year not found", body = crate::error::ErrorBody),
        (status = 422, description = "Missing or malformed query parameters", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn health_data(
    State(state): State<StatsState>,
    query: Result<Query<HealthDataQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(params) = query?;
    let _timer = metrics::timer_dataset_query();
    metrics::inc_dataset_queries("health_data");

    let rows = state.dataset.filter(&params.country, params.year);
    if rows.is_empty() {
        metrics::inc_dataset_misses("health_data");
        return Err(ApiError::NotFound(COUNTRY_NOT_FOUND));
    }

    let table = build_table(&rows, params.aggregate);
    info!(
        country = %params.country,
        year = params.year,
        aggregate = params.aggregate,
        rows = table.len(),
        "Serving health data"
    );

    Ok(Html(pages::health_data_page(
        &params.country,
        params.year,
        &table,
    )))
}

/// Compares selected health data for two countries in a given year.
#[utoipa::path(
    get,
    path = "/health_compare",
    tag = "stats",
    params(HealthCompareQuery),
    responses(
        (status = 200, description = "One HTML table per country", body = String, content_type = "text/html"),
        (status = 404, description = "Countries or year not found", body = crate::error::ErrorBody),
        (status = 422, description = "Missing or malformed query parameters", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, query))]
pub async fn health_compare(
    State(state): State<StatsState>,
    query: Result<Query<HealthCompareQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(params) = query?;
    let _timer = metrics::timer_dataset_query();
    metrics::inc_dataset_queries("health_compare");

    let (first, second) = state
        .dataset
        .compare(&params.country1, &params.country2, params.year);
    if first.is_empty() || second.is_empty() {
        metrics::inc_dataset_misses("health_compare");
        return Err(ApiError::NotFound(COUNTRIES_NOT_FOUND));
    }

    let table1 = build_table(&first, params.aggregate);
    let table2 = build_table(&second, params.aggregate);
    info!(
        country1 = %params.country1,
        country2 = %params.country2,
        year = params.year,
        aggregate = params.aggregate,
        "Serving health comparison"
    );

    Ok(Html(pages::comparison_page(
        &params.country1,
        &params.country2,
        params.year,
        &table1,
        &table2,
    )))
}
