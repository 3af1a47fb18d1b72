//! City Health Dashboard proxy.
//!
//! This module handles:
//! - Metric and disease identifiers used by the upstream API
//! - The upstream REST client
//! - Risk classification over upstream payloads

pub mod client;
pub mod risk;
pub mod types;

pub use client::DashboardClient;
pub use risk::{assess, classify, metric_value, RiskAssessment, RiskLevel};
pub use types::{Disease, MetricId};
