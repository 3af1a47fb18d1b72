//! HTTP route definitions for both services.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, health, DashboardState, StatsState};
use super::{proxy, stats};

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI document for the statistics service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Public Health Data API",
        description = "An API for accessing and exploring public health statistics.",
        version = "1.0.0"
    ),
    paths(stats::index, stats::health_data, stats::health_compare, handlers::health),
    tags(
        (name = "stats", description = "Global health statistics views"),
        (name = "operations", description = "Liveness")
    )
)]
pub struct StatsApiDoc;

/// OpenAPI document for the dashboard proxy.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Public Health Data API",
        description = "City Health Dashboard data with derived risk levels.",
        version = "1.0.0"
    ),
    paths(
        proxy::index,
        proxy::disease_statistics,
        proxy::vaccination_rates,
        proxy::trend_analysis,
        proxy::compare,
        proxy::risk_assessment,
        proxy::geographies,
        handlers::health
    ),
    tags(
        (name = "dashboard", description = "City Health Dashboard passthrough"),
        (name = "operations", description = "Liveness")
    )
)]
pub struct DashboardApiDoc;

/// Create the statistics service router.
pub fn create_stats_router(state: StatsState) -> Router {
    Router::new()
        .route("/", get(stats::index))
        .route("/health_data", get(stats::health_data))
        .route("/health_compare", get(stats::health_compare))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(handlers::metrics))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_PATH, StatsApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the dashboard proxy router.
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(proxy::index))
        .route("/disease-statistics", get(proxy::disease_statistics))
        .route("/vaccination-rates", get(proxy::vaccination_rates))
        .route("/trend-analysis", get(proxy::trend_analysis))
        .route("/compare", get(proxy::compare))
        .route("/risk-assessment", get(proxy::risk_assessment))
        .route("/geographies", get(proxy::geographies))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(handlers::metrics))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_PATH, DashboardApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
