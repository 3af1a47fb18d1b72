//! Row type for the global health statistics CSV.

use serde::Deserialize;

/// `Country` column header.
pub const COL_COUNTRY: &str = "Country";
/// `Year` column header.
pub const COL_YEAR: &str = "Year";
/// `Disease Name` column header.
pub const COL_DISEASE_NAME: &str = "Disease Name";
/// `Prevalence Rate (%)` column header.
pub const COL_PREVALENCE_RATE: &str = "Prevalence Rate (%)";
/// `Mortality Rate (%)` column header.
pub const COL_MORTALITY_RATE: &str = "Mortality Rate (%)";
/// `Availability of Vaccines/Treatment` column header.
pub const COL_AVAILABILITY: &str = "Availability of Vaccines/Treatment";
/// `Healthcare Access (%)` column header.
pub const COL_HEALTHCARE_ACCESS: &str = "Healthcare Access (%)";
/// `Average Treatment Cost (USD)` column header.
pub const COL_TREATMENT_COST: &str = "Average Treatment Cost (USD)";
/// `Recovery Rate (%)` column header.
pub const COL_RECOVERY_RATE: &str = "Recovery Rate (%)";

/// Every header the loader insists on. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_COUNTRY,
    COL_YEAR,
    COL_DISEASE_NAME,
    COL_PREVALENCE_RATE,
    COL_MORTALITY_RATE,
    COL_AVAILABILITY,
    COL_HEALTHCARE_ACCESS,
    COL_TREATMENT_COST,
    COL_RECOVERY_RATE,
];

/// Columns shown for unaggregated rows, in display order.
pub const SELECTED_COLUMNS: [&str; 8] = [
    COL_COUNTRY,
    COL_DISEASE_NAME,
    COL_PREVALENCE_RATE,
    COL_MORTALITY_RATE,
    COL_AVAILABILITY,
    COL_HEALTHCARE_ACCESS,
    COL_TREATMENT_COST,
    COL_RECOVERY_RATE,
];

/// Numeric columns averaged per disease, in display order.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    COL_PREVALENCE_RATE,
    COL_MORTALITY_RATE,
    COL_HEALTHCARE_ACCESS,
    COL_TREATMENT_COST,
    COL_RECOVERY_RATE,
];

/// One row of the statistics dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthRecord {
    /// Country name as written in the file.
    #[serde(rename = "Country")]
    pub country: String,
    /// Observation year.
    #[serde(rename = "Year")]
    pub year: i32,
    /// Disease name.
    #[serde(rename = "Disease Name")]
    pub disease_name: String,
    /// Prevalence rate in percent.
    #[serde(rename = "Prevalence Rate (%)")]
    pub prevalence_rate: f64,
    /// Mortality rate in percent.
    #[serde(rename = "Mortality Rate (%)")]
    pub mortality_rate: f64,
    /// Whether vaccines or treatment are available ("Yes"/"No").
    #[serde(rename = "Availability of Vaccines/Treatment")]
    pub availability: String,
    /// Healthcare access in percent.
    #[serde(rename = "Healthcare Access (%)")]
    pub healthcare_access: f64,
    /// Average treatment cost in USD.
    #[serde(rename = "Average Treatment Cost (USD)")]
    pub treatment_cost: f64,
    /// Recovery rate in percent.
    #[serde(rename = "Recovery Rate (%)")]
    pub recovery_rate: f64,
}

impl HealthRecord {
    /// Numeric fields in [`NUMERIC_COLUMNS`] order.
    pub fn numeric_values(&self) -> [f64; NUMERIC_COLUMNS.len()] {
        [
            self.prevalence_rate,
            self.mortality_rate,
            self.healthcare_access,
            self.treatment_cost,
            self.recovery_rate,
        ]
    }
}
