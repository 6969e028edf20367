use serde::{Deserialize, Serialize};

/// Easing curve applied to linear transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Slow start and end; the usual default for chart transitions.
    #[default]
    CubicInOut,
    CubicOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let doubled = t * 2.0;
                if doubled <= 1.0 {
                    doubled * doubled * doubled / 2.0
                } else {
                    let rest = doubled - 2.0;
                    (rest * rest * rest + 2.0) / 2.0
                }
            }
            Self::CubicOut => {
                let rest = t - 1.0;
                rest * rest * rest + 1.0
            }
        }
    }
}
