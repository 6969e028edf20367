use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::Row;
use crate::error::{ChartError, ChartResult};

use super::Dataset;

/// Header names of the three columns the chart consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    #[serde(default = "default_group_column")]
    pub group: String,
    #[serde(default = "default_category_column")]
    pub category: String,
    #[serde(default = "default_value_column")]
    pub value: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            group: default_group_column(),
            category: default_category_column(),
            value: default_value_column(),
        }
    }
}

fn default_group_column() -> String {
    "Area".to_owned()
}

fn default_category_column() -> String {
    "Item".to_owned()
}

fn default_value_column() -> String {
    "Value".to_owned()
}

fn default_delimiter() -> char {
    ','
}

/// Source format options for [`Dataset::from_reader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvLoadOptions {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub columns: CsvColumns,
}

impl Default for CsvLoadOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            columns: CsvColumns::default(),
        }
    }
}

impl CsvLoadOptions {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.delimiter.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "csv delimiter must be a single ascii character (got {:?})",
                self.delimiter
            )));
        }
        for (name, column) in [
            ("group", &self.columns.group),
            ("category", &self.columns.category),
            ("value", &self.columns.value),
        ] {
            if column.trim().is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "csv {name} column name must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome counters of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    group: usize,
    category: usize,
    value: usize,
}

impl Dataset {
    /// Opens and loads a delimited text file.
    pub fn from_path(
        path: impl AsRef<Path>,
        options: &CsvLoadOptions,
    ) -> ChartResult<(Self, LoadReport)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened dataset file");
        Self::from_reader(file, options)
    }

    /// Loads rows from any reader producing delimited text with a header row.
    ///
    /// Records that fail to decode, miss a field, or carry a value that is not
    /// a finite non-negative number are skipped and counted in the report.
    pub fn from_reader<Rd: Read>(
        reader: Rd,
        options: &CsvLoadOptions,
    ) -> ChartResult<(Self, LoadReport)> {
        options.validate()?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(options.delimiter as u8)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let indices = resolve_columns(&headers, &options.columns)?;

        let mut rows = Vec::new();
        let mut report = LoadReport::default();
        for (record_index, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    debug!(record_index, error = %err, "skipping undecodable record");
                    report.rows_skipped += 1;
                    continue;
                }
            };

            match parse_row(&record, indices) {
                Ok(row) => {
                    rows.push(row);
                    report.rows_loaded += 1;
                }
                Err(err) => {
                    let line = record.position().map(csv::Position::line);
                    debug!(record_index, ?line, error = %err, "skipping invalid record");
                    report.rows_skipped += 1;
                }
            }
        }

        info!(
            rows_loaded = report.rows_loaded,
            rows_skipped = report.rows_skipped,
            "loaded dataset"
        );
        Ok((Self::new(rows), report))
    }
}

fn resolve_columns(headers: &StringRecord, columns: &CsvColumns) -> ChartResult<ColumnIndices> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ChartError::MissingColumn(name.to_owned()))
    };

    Ok(ColumnIndices {
        group: find(&columns.group)?,
        category: find(&columns.category)?,
        value: find(&columns.value)?,
    })
}

fn parse_row(record: &StringRecord, indices: ColumnIndices) -> ChartResult<Row> {
    let field = |index: usize, name: &str| {
        record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ChartError::InvalidData(format!("missing `{name}` field")))
    };

    let group = field(indices.group, "group")?;
    let category = field(indices.category, "category")?;
    let raw_value = field(indices.value, "value")?;
    let value = raw_value
        .parse::<f64>()
        .map_err(|_| ChartError::InvalidData(format!("value `{raw_value}` is not numeric")))?;

    Row::new(category, group, value)
}
