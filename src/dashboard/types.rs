//! City Health Dashboard identifiers.

use std::fmt;

use strum::{Display, EnumString};

/// Geographic level sent with every city query.
pub const GEO_LEVEL_CITY: &str = "city";

/// Census shape year used when none is requested.
pub const DEFAULT_CENSUS_SHAPE_YEAR: &str = "2020";

/// Numeric metric identifier in the dashboard's `metric-data/{id}` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricId(pub u32);

impl MetricId {
    /// City-level disease statistics.
    pub const DISEASE_STATISTICS: MetricId = MetricId(1);
    /// City-level vaccination rates.
    pub const VACCINATION_RATES: MetricId = MetricId(5);

    /// Endpoint path relative to the API base URL.
    pub fn endpoint(&self) -> String {
        format!("metric-data/{}", self.0)
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diseases with historical trend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Disease {
    /// Seasonal influenza.
    #[strum(serialize = "flu")]
    Flu,
    /// COVID-19.
    #[strum(serialize = "covid")]
    Covid,
}

impl Disease {
    /// Metric carrying this disease's trend series.
    pub fn metric(&self) -> MetricId {
        match self {
            Disease::Flu => MetricId(1),
            Disease::Covid => MetricId(2),
        }
    }
}
