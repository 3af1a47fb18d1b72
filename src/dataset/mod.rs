//! Global health statistics dataset.
//!
//! This module handles:
//! - The CSV row type and the columns the services read
//! - Loading and filtering the in-memory dataset
//! - Raw and per-disease aggregated table views, rendered as HTML

pub mod record;
pub mod store;
pub mod table;

pub use record::HealthRecord;
pub use store::{DatasetSummary, HealthDataset, IndexedRecord};
pub use table::{aggregate_by_disease, raw_table, Cell, Table, TableRow};
