use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::row::Row;

/// Number of categories displayed per group unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// Bounded, ordered view of the dataset for one group.
///
/// Invariants: at most `n` rows, all with `group() == self.group()`, values
/// non-increasing, categories unique, ties in encounter order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedSet {
    group: String,
    rows: Vec<Row>,
}

impl RankedSet {
    #[must_use]
    pub fn empty(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
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

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Categories in display order (top to bottom).
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(Row::category)
    }

    /// Largest value in the set, `0.0` when empty.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        // Rows are sorted descending, so the head is the maximum.
        self.rows.first().map_or(0.0, Row::value)
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.category() == category)
    }
}

/// Filters `rows` to `group`, ranks by value descending and keeps the top `n`.
///
/// The sort is stable, so equal values keep their encounter order. A category
/// repeated inside the group keeps only its first (highest ranked) row because
/// categories are the identity of rendered bars. An unknown group yields an
/// empty set rather than an error.
#[must_use]
pub fn rank(rows: &[Row], group: &str, n: usize) -> RankedSet {
    let mut matching: Vec<&Row> = rows.iter().filter(|row| row.group() == group).collect();
    matching.sort_by(|left, right| right.value().total_cmp(&left.value()));

    let mut seen = HashSet::with_capacity(n);
    let ranked = matching
        .into_iter()
        .filter(|row| seen.insert(row.category()))
        .take(n)
        .cloned()
        .collect();

    RankedSet {
        group: group.to_owned(),
        rows: ranked,
    }
}
