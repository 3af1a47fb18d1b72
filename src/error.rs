//! Unified error types for the public health services.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Unified error type for startup and CLI paths.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Dataset loading error.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Upstream dashboard error.
    #[error("dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent or empty.
    #[error("{name} is required")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },

    /// A setting is present but unusable.
    #[error("{name} is invalid: {reason}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised while loading the statistics CSV.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be opened or its header read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Dataset path.
        path: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The header row lacks a column the services need.
    #[error("{path} is missing required column \"{column}\"")]
    MissingColumn {
        /// Dataset path.
        path: String,
        /// The missing column header.
        column: &'static str,
    },

    /// A data row could not be deserialized.
    #[error("failed to parse row {row} of {path}: {source}")]
    Parse {
        /// Dataset path.
        path: String,
        /// Zero-based data row position.
        row: usize,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Errors talking to the upstream City Health Dashboard API.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Upstream answered with a non-200 status.
    #[error("Error fetching data: {body}")]
    UpstreamStatus {
        /// HTTP status code returned upstream.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Transport or decode failure. The request URL is stripped since it carries the token.
    #[error("Error fetching data: {0}")]
    Request(#[source] reqwest::Error),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Error fetching data: invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        /// Relative endpoint path.
        endpoint: String,
        /// Join error.
        #[source]
        source: url::ParseError,
    },
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        DashboardError::Request(e.without_url())
    }
}

/// Error returned from HTTP handlers, rendered as `{"detail": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Nothing matched the requested filters.
    #[error("{0}")]
    NotFound(&'static str),

    /// A query value was well-formed but not acceptable.
    #[error("{0}")]
    BadRequest(String),

    /// Query string missing fields or failing to deserialize.
    #[error("{0}")]
    InvalidQuery(String),

    /// Upstream dashboard failure.
    #[error(transparent)]
    Upstream(#[from] DashboardError),
}

/// JSON error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            warn!(status = status.as_u16(), detail = %detail, "Request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
