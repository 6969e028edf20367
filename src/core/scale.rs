use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous `value -> length` mapping.
///
/// Unlike a plain affine map, an empty domain (`start == end`) is accepted and
/// treated as degenerate: every value maps to the range start. That is the
/// state of a chart whose ranked set is empty or all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_end == self.domain_start
    }

    /// Maps a domain value into the output range.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps an output coordinate back into the domain.
    ///
    /// Returns `None` for a degenerate scale, which has no inverse.
    #[must_use]
    pub fn invert(self, coordinate: f64) -> Option<f64> {
        let range_span = self.range_end - self.range_start;
        if self.is_degenerate() || range_span == 0.0 || !coordinate.is_finite() {
            return None;
        }
        let normalized = (coordinate - self.range_start) / range_span;
        Some(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Step between "nice" ticks (1, 2 or 5 times a power of ten) such that
    /// no more than `max_count` ticks fall inside the domain.
    #[must_use]
    pub fn tick_step(self, max_count: usize) -> Option<f64> {
        if max_count == 0 || self.is_degenerate() {
            return None;
        }
        let (low, high) = self.ordered_domain();
        let mut step = nice_step((high - low) / max_count as f64)?;
        while tick_count_for_step(low, high, step) > max_count {
            step = next_nice_step(step)?;
        }
        Some(step)
    }

    /// Tick values in ascending order, never more than `max_count`.
    ///
    /// A degenerate scale has exactly one tick: its domain start.
    #[must_use]
    pub fn ticks(self, max_count: usize) -> Vec<f64> {
        if max_count == 0 {
            return Vec::new();
        }
        let Some(step) = self.tick_step(max_count) else {
            return vec![self.domain_start];
        };

        let (low, high) = self.ordered_domain();
        let first = (low / step).ceil() as i64;
        let last = (high / step).floor() as i64;
        // Sub-unit steps divide by the inverse to avoid accumulating
        // representation error (0.1 * 3 != 0.3).
        let inverse = (1.0 / step).round();
        (first..=last)
            .map(|index| {
                if step >= 1.0 {
                    index as f64 * step
                } else {
                    index as f64 / inverse
                }
            })
            .collect()
    }

    fn ordered_domain(self) -> (f64, f64) {
        if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        }
    }
}

fn nice_step(raw_step: f64) -> Option<f64> {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return None;
    }
    let power = 10f64.powf(raw_step.log10().floor());
    let error = raw_step / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * power)
}

fn next_nice_step(step: f64) -> Option<f64> {
    let power = 10f64.powf(step.log10().floor());
    let mantissa = (step / power).round() as i64;
    let next = match mantissa {
        1 => 2.0 * power,
        2 => 5.0 * power,
        _ => 10.0 * power,
    };
    next.is_finite().then_some(next)
}

fn tick_count_for_step(low: f64, high: f64, step: f64) -> usize {
    let first = (low / step).ceil();
    let last = (high / step).floor();
    if last < first {
        0
    } else {
        (last - first) as usize + 1
    }
}
