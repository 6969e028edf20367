use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default fraction of each step reserved for gaps between bands.
pub const DEFAULT_BAND_PADDING: f64 = 0.3;

/// Discrete `category -> position` mapping.
///
/// The domain order is the stacking order, top to bottom. The same padding is
/// applied between bands and at both ends, and bands are centred in the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !range.0.is_finite() || !range.1.is_finite() || range.1 < range.0 {
            return Err(ChartError::InvalidData(
                "band range must be finite and ascending".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }

        let domain: IndexSet<String> = domain.into_iter().map(Into::into).collect();
        let count = domain.len() as f64;
        let extent = range.1 - range.0;
        let step = extent / (count - padding + 2.0 * padding).max(1.0);
        let bandwidth = step * (1.0 - padding);
        let offset = range.0 + (extent - step * (count - padding)) * 0.5;

        Ok(Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding,
            step,
            bandwidth,
            offset,
        })
    }

    /// Start coordinate of the band for `category`, `None` if unknown.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .get_index_of(category)
            .map(|index| self.offset + self.step * index as f64)
    }

    /// Centre coordinate of the band for `category`.
    #[must_use]
    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category)
            .map(|start| start + self.bandwidth * 0.5)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
