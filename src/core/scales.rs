use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::band_scale::BandScale;
use super::ranking::RankedSet;
use super::scale::LinearScale;

/// Scales derived from one ranked set.
///
/// Both mappings are rebuilt from scratch for every ranked set; nothing is
/// carried over from the previous selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub value: LinearScale,
    pub category: BandScale,
}

impl ChartScales {
    /// Bar length for `value`.
    #[must_use]
    pub fn length(&self, value: f64) -> f64 {
        self.value.map(value)
    }

    /// Band start for `category`.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.category.position(category)
    }
}

pub fn build_scales(
    ranked: &RankedSet,
    body_width: f64,
    body_height: f64,
    padding: f64,
) -> ChartResult<ChartScales> {
    if !body_width.is_finite() || body_width < 0.0 {
        return Err(ChartError::InvalidData(
            "body width must be finite and >= 0".to_owned(),
        ));
    }
    if !body_height.is_finite() || body_height < 0.0 {
        return Err(ChartError::InvalidData(
            "body height must be finite and >= 0".to_owned(),
        ));
    }

    let value = LinearScale::new((0.0, ranked.max_value()), (0.0, body_width))?;
    let category = BandScale::new(ranked.categories(), (0.0, body_height), padding)?;
    Ok(ChartScales { value, category })
}
