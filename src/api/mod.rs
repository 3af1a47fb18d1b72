//! HTTP API for the statistics and dashboard proxy services.

pub mod handlers;
pub mod pages;
pub mod proxy;
pub mod routes;
pub mod stats;

pub use handlers::{DashboardState, StatsState};
pub use routes::{create_dashboard_router, create_stats_router};
