//! Public health data services.
//!
//! Two small HTTP services over public-health statistics:
//!
//! - a **statistics service** that loads the global health statistics CSV
//!   once and serves per-country views, optionally averaged per disease, as
//!   HTML tables;
//! - a **dashboard proxy** that forwards queries to the City Health Dashboard
//!   API and derives a risk level from case counts and vaccination rates.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`dataset`]: CSV loading, filtering, aggregation and table rendering
//! - [`dashboard`]: Upstream client and risk classification
//! - [`api`]: HTTP routers and handlers for both services
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
