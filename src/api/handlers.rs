//! Shared application state and operational handlers.

use std::sync::Arc;

use axum::extract::{FromRef, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use crate::dashboard::DashboardClient;
use crate::dataset::HealthDataset;

/// Handle to the Prometheus recorder, absent when metrics are disabled.
#[derive(Debug, Clone, Default)]
pub struct MetricsHandle(pub Option<PrometheusHandle>);

/// State for the statistics service.
#[derive(Debug, Clone)]
pub struct StatsState {
    /// Dataset loaded at startup.
    pub dataset: Arc<HealthDataset>,
    /// Metrics recorder.
    pub metrics: MetricsHandle,
}

impl StatsState {
    /// Create new state around a loaded dataset.
    pub fn new(dataset: HealthDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            metrics: MetricsHandle::default(),
        }
    }

    /// Attach a metrics recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = MetricsHandle(Some(handle));
        self
    }
}

/// State for the dashboard proxy service.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Upstream client.
    pub client: DashboardClient,
    /// Metrics recorder.
    pub metrics: MetricsHandle,
}

impl DashboardState {
    /// Create new state around an upstream client.
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            metrics: MetricsHandle::default(),
        }
    }

    /// Attach a metrics recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = MetricsHandle(Some(handle));
        self
    }
}

impl FromRef<StatsState> for MetricsHandle {
    fn from_ref(state: &StatsState) -> Self {
        state.metrics.clone()
    }
}

impl FromRef<DashboardState> for MetricsHandle {
    fn from_ref(state: &DashboardState) -> Self {
        state.metrics.clone()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "operations",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition handler - 404 when no recorder is installed.
pub async fn metrics(State(handle): State<MetricsHandle>) -> impl IntoResponse {
    match handle.0 {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
