//! Dataset loading.
//!
//! The loader reads delimited text with a header row and keeps three columns:
//! group (`Area`), category (`Item`) and value (`Value`). Problems scoped to a
//! single record drop that record; problems with the source as a whole
//! (unreadable input, missing header column) fail the load.

mod csv_loader;

pub use csv_loader::{CsvColumns, CsvLoadOptions, LoadReport};

use indexmap::IndexSet;

use crate::core::Row;

/// In-memory rows for one session, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct groups in first-encounter order.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(Row::group)
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[must_use]
    pub fn contains_group(&self, group: &str) -> bool {
        self.rows.iter().any(|row| row.group() == group)
    }
}
