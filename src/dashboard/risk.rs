//! Two-tier risk classification from case counts and vaccination rates.

use serde::Serialize;
use serde_json::Value;
use strum::Display;
use utoipa::ToSchema;

/// Cases above which a city can be high risk.
pub const HIGH_RISK_CASES: f64 = 10_000.0;
/// Vaccination rate (%) below which a city can be high risk.
pub const HIGH_RISK_MAX_VACCINATION: f64 = 70.0;
/// Cases above which a city can be moderate risk.
pub const MODERATE_RISK_CASES: f64 = 5_000.0;
/// Vaccination rate (%) below which a city can be moderate risk.
pub const MODERATE_RISK_MAX_VACCINATION: f64 = 85.0;

/// Risk label attached to a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum RiskLevel {
    /// Many cases and low vaccination.
    High,
    /// Elevated cases or middling vaccination.
    Moderate,
    /// Everything else.
    Low,
}

/// Risk assessment response body.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskAssessment {
    /// City as requested.
    pub city: String,
    /// Derived risk label.
    pub risk_level: RiskLevel,
}

/// Classify a city. Both thresholds are strict.
pub fn classify(cases: f64, vaccination_rate: f64) -> RiskLevel {
    if cases > HIGH_RISK_CASES && vaccination_rate < HIGH_RISK_MAX_VACCINATION {
        RiskLevel::High
    } else if cases > MODERATE_RISK_CASES && vaccination_rate < MODERATE_RISK_MAX_VACCINATION {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// The top-level `value` of an upstream payload, or 0 when it is absent
/// or not a number.
pub fn metric_value(data: &Value) -> f64 {
    match data.get("value") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Assess a city from its disease and vaccination payloads.
pub fn assess(city: &str, disease_data: &Value, vaccination_data: &Value) -> RiskAssessment {
    let cases = metric_value(disease_data);
    let vaccination_rate = metric_value(vaccination_data);

    RiskAssessment {
        city: city.to_string(),
        risk_level: classify(cases, vaccination_rate),
    }
}
