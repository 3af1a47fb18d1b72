//! In-memory statistics dataset and its row filters.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, instrument};

use super::record::{HealthRecord, REQUIRED_COLUMNS};
use crate::error::DatasetError;

/// A dataset row together with its zero-based position in the file.
pub type IndexedRecord<'a> = (usize, &'a HealthRecord);

/// The statistics dataset, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct HealthDataset {
    /// Where the rows came from.
    source: String,
    /// Rows in file order.
    records: Vec<HealthRecord>,
}

/// Overview of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Number of data rows.
    pub rows: usize,
    /// Distinct countries (case-insensitive).
    pub countries: usize,
    /// Distinct disease names.
    pub diseases: usize,
    /// Earliest and latest year present.
    pub years: Option<(i32, i32)>,
}

impl HealthDataset {
    /// Load the dataset from a CSV file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let source = path.as_ref().display().to_string();
        let reader = ReaderBuilder::new()
            .from_path(path.as_ref())
            .map_err(|e| DatasetError::Read {
                path: source.clone(),
                source: e,
            })?;

        Self::from_csv_reader(reader, source)
    }

    /// Load the dataset from any reader producing CSV text.
    pub fn from_reader<R: Read>(rdr: R, source: impl Into<String>) -> Result<Self, DatasetError> {
        let reader = ReaderBuilder::new().from_reader(rdr);
        Self::from_csv_reader(reader, source.into())
    }

    fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        source: String,
    ) -> Result<Self, DatasetError> {
        let headers = reader
            .headers()
            .map_err(|e| DatasetError::Read {
                path: source.clone(),
                source: e,
            })?
            .clone();

        if let Some(column) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(DatasetError::MissingColumn {
                path: source,
                column,
            });
        }

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<HealthRecord>().enumerate() {
            let record = result.map_err(|e| DatasetError::Parse {
                path: source.clone(),
                row,
                source: e,
            })?;
            records.push(record);
        }

        info!(source = %source, rows = records.len(), "Health statistics loaded");

        Ok(Self { source, records })
    }

    /// Where the rows were loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in file order.
    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    /// Rows for one country (case-insensitive) and year.
    #[instrument(skip(self))]
    pub fn filter(&self, country: &str, year: i32) -> Vec<IndexedRecord<'_>> {
        let wanted = country.to_lowercase();

        let matches: Vec<_> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.year == year && r.country.to_lowercase() == wanted)
            .collect();

        debug!(matches = matches.len(), "Filtered dataset");
        matches
    }

    /// Rows for two countries in one year, split in a single pass.
    ///
    /// A row that matches `country1` is never also assigned to `country2`,
    /// so asking for the same country twice leaves the second set empty.
    #[instrument(skip(self))]
    pub fn compare(
        &self,
        country1: &str,
        country2: &str,
        year: i32,
    ) -> (Vec<IndexedRecord<'_>>, Vec<IndexedRecord<'_>>) {
        let first = country1.to_lowercase();
        let second = country2.to_lowercase();

        let mut first_rows = Vec::new();
        let mut second_rows = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            if record.year != year {
                continue;
            }
            let country = record.country.to_lowercase();
            if country == first {
                first_rows.push((index, record));
            } else if country == second {
                second_rows.push((index, record));
            }
        }

        debug!(
            first = first_rows.len(),
            second = second_rows.len(),
            "Split dataset for comparison"
        );
        (first_rows, second_rows)
    }

    /// Counts of rows, countries, diseases and the covered year range.
    pub fn summary(&self) -> DatasetSummary {
        let countries: BTreeSet<String> = self
            .records
            .iter()
            .map(|r| r.country.to_lowercase())
            .collect();
        let diseases: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.disease_name.as_str())
            .collect();
        let years = self
            .records
            .iter()
            .map(|r| r.year)
            .fold(None, |range, year| match range {
                None => Some((year, year)),
                Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
            });

        DatasetSummary {
            rows: self.records.len(),
            countries: countries.len(),
            diseases: diseases.len(),
            years,
        }
    }
}
