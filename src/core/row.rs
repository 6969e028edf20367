use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One dataset record: a category (product) measured for a group (country).
///
/// Rows are validated on construction and immutable afterwards, so every
/// stage downstream of the loader can rely on a finite, non-negative value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    category: String,
    group: String,
    value: f64,
}

impl Row {
    pub fn new(
        category: impl Into<String>,
        group: impl Into<String>,
        value: f64,
    ) -> ChartResult<Self> {
        let category = category.into();
        let group = group.into();
        if category.is_empty() {
            return Err(ChartError::InvalidData(
                "row category must not be empty".to_owned(),
            ));
        }
        if group.is_empty() {
            return Err(ChartError::InvalidData(
                "row group must not be empty".to_owned(),
            ));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "row value must be finite and >= 0 (got {value})"
            )));
        }

        Ok(Self {
            category,
            group,
            value,
        })
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::Row;

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        assert!(Row::new("Wheat", "USA", -1.0).is_err());
        assert!(Row::new("Wheat", "USA", f64::NAN).is_err());
        assert!(Row::new("Wheat", "USA", f64::INFINITY).is_err());
        assert!(Row::new("Wheat", "USA", 0.0).is_ok());
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert!(Row::new("", "USA", 1.0).is_err());
        assert!(Row::new("Wheat", "", 1.0).is_err());
    }
}
