use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::animation::{Transition, Tween};
use crate::core::{ChartScales, LinearScale};
use crate::error::{ChartError, ChartResult};

use super::format::{format_currency, truncate_label};

/// Default duration of axis transitions.
pub const DEFAULT_AXIS_TRANSITION_MS: f64 = 750.0;
pub const DEFAULT_MAX_VALUE_TICKS: usize = 5;
pub const DEFAULT_CATEGORY_LABEL_MAX_CHARS: usize = 15;
pub const DEFAULT_VALUE_LABEL_PREFIX: &str = "$";

/// Tick generation and label policy for both axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabelConfig {
    pub max_value_ticks: usize,
    pub category_label_max_chars: usize,
    pub value_label_prefix: String,
}

impl Default for AxisLabelConfig {
    fn default() -> Self {
        Self {
            max_value_ticks: DEFAULT_MAX_VALUE_TICKS,
            category_label_max_chars: DEFAULT_CATEGORY_LABEL_MAX_CHARS,
            value_label_prefix: DEFAULT_VALUE_LABEL_PREFIX.to_owned(),
        }
    }
}

impl AxisLabelConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if self.max_value_ticks == 0 {
            return Err(ChartError::InvalidData(
                "max value ticks must be > 0".to_owned(),
            ));
        }
        if self.category_label_max_chars < 2 {
            return Err(ChartError::InvalidData(
                "category label max chars must be >= 2".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Sampled state of one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickGeometry {
    pub label: String,
    /// Body-relative coordinate along the axis.
    pub position: f64,
    pub opacity: f64,
}

/// Both axes sampled at one instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisState {
    pub value_ticks: Vec<TickGeometry>,
    pub category_ticks: Vec<TickGeometry>,
}

#[derive(Debug, Clone)]
struct AnimatedTick {
    label: String,
    position: Tween,
    opacity: Tween,
    exiting: bool,
}

impl AnimatedTick {
    fn entering(label: String, from: f64, to: f64, transition: Transition) -> Self {
        Self {
            label,
            position: Tween::new(from, to, transition),
            opacity: Tween::new(0.0, 1.0, transition),
            exiting: false,
        }
    }

    fn retarget(&mut self, label: String, to: f64, transition: Transition) {
        self.label = label;
        if !self.exiting && (self.position.to - to).abs() <= 1e-9 && self.opacity.to == 1.0 {
            return;
        }
        self.position = self.position.retarget(to, transition);
        self.opacity = self.opacity.retarget(1.0, transition);
        self.exiting = false;
    }

    fn fade_out(&mut self, to: f64, transition: Transition) {
        self.position = self.position.retarget(to, transition);
        self.opacity = self.opacity.retarget(0.0, transition);
        self.exiting = true;
    }

    fn is_gone(&self, now_ms: f64) -> bool {
        self.exiting && self.opacity.is_finished(now_ms)
    }

    fn is_at_rest(&self, now_ms: f64) -> bool {
        self.position.is_finished(now_ms) && self.opacity.is_finished(now_ms)
    }

    fn geometry_at(&self, now_ms: f64) -> TickGeometry {
        TickGeometry {
            label: self.label.clone(),
            position: self.position.value_at(now_ms),
            opacity: self.opacity.value_at(now_ms),
        }
    }
}

/// Reflows the value and category axes whenever the scales change.
///
/// Ticks carry no identity beyond their key (value or category): a tick that
/// survives a rescale slides to its new coordinate, new ticks fade in from
/// where the previous scale would have put them, and stale ticks fade out.
#[derive(Debug, Clone, Default)]
pub struct AxisRenderer {
    config: AxisLabelConfig,
    previous_value_scale: Option<LinearScale>,
    value_ticks: IndexMap<OrderedFloat<f64>, AnimatedTick>,
    category_ticks: IndexMap<String, AnimatedTick>,
}

impl AxisRenderer {
    pub fn new(config: AxisLabelConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &AxisLabelConfig {
        &self.config
    }

    pub fn render_axes(&mut self, scales: &ChartScales, transition: Transition) {
        self.reflow_value_axis(scales.value, transition);
        self.reflow_category_axis(scales, transition);
        trace!(
            value_ticks = self.value_ticks.len(),
            category_ticks = self.category_ticks.len(),
            "reflowed axes"
        );
    }

    fn reflow_value_axis(&mut self, scale: LinearScale, transition: Transition) {
        let max_ticks = self.config.max_value_ticks;
        let step = scale.tick_step(max_ticks);
        let values: SmallVec<[f64; 8]> = scale.ticks(max_ticks).into_iter().collect();
        let previous = self
            .previous_value_scale
            .filter(|previous| !previous.is_degenerate());

        for (key, tick) in &mut self.value_ticks {
            if !values.contains(&key.0) {
                tick.fade_out(scale.map(key.0), transition);
            }
        }

        for value in values {
            let label = format_currency(value, step, &self.config.value_label_prefix);
            let target = scale.map(value);
            match self.value_ticks.get_mut(&OrderedFloat(value)) {
                Some(tick) => tick.retarget(label, target, transition),
                None => {
                    let from = previous.map_or(target, |previous| previous.map(value));
                    self.value_ticks.insert(
                        OrderedFloat(value),
                        AnimatedTick::entering(label, from, target, transition),
                    );
                }
            }
        }

        self.value_ticks.sort_keys();
        self.previous_value_scale = Some(scale);
    }

    fn reflow_category_axis(&mut self, scales: &ChartScales, transition: Transition) {
        let band = &scales.category;

        for (category, tick) in &mut self.category_ticks {
            if band.position(category).is_none() && !tick.exiting {
                let held = tick.position.value_at(transition.start_ms);
                tick.fade_out(held, transition);
            }
        }

        for category in band.domain() {
            let Some(center) = band.center(category) else {
                continue;
            };
            let label = truncate_label(category, self.config.category_label_max_chars);
            match self.category_ticks.get_mut(category) {
                Some(tick) => tick.retarget(label, center, transition),
                None => {
                    self.category_ticks.insert(
                        category.to_owned(),
                        AnimatedTick::entering(label, center, center, transition),
                    );
                }
            }
        }
    }

    /// Drops ticks whose fade-out finished.
    pub fn advance(&mut self, now_ms: f64) {
        self.value_ticks.retain(|_, tick| !tick.is_gone(now_ms));
        self.category_ticks.retain(|_, tick| !tick.is_gone(now_ms));
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.value_ticks
            .values()
            .chain(self.category_ticks.values())
            .any(|tick| tick.exiting || !tick.is_at_rest(now_ms))
    }

    #[must_use]
    pub fn state_at(&self, now_ms: f64) -> AxisState {
        AxisState {
            value_ticks: self
                .value_ticks
                .values()
                .map(|tick| tick.geometry_at(now_ms))
                .collect(),
            category_ticks: self
                .category_ticks
                .values()
                .map(|tick| tick.geometry_at(now_ms))
                .collect(),
        }
    }

    pub fn clear(&mut self) {
        self.previous_value_scale = None;
        self.value_ticks.clear();
        self.category_ticks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisLabelConfig, AxisRenderer};
    use crate::animation::{Easing, Transition};
    use crate::core::{Row, build_scales, rank};

    #[test]
    fn rescale_slides_surviving_ticks_and_fades_new_ones() {
        let rows = vec![
            Row::new("Wheat", "USA", 1_000.0).expect("row"),
            Row::new("Wheat", "Canada", 2_000.0).expect("row"),
        ];
        let mut axes = AxisRenderer::new(AxisLabelConfig::default()).expect("axes");
        let usa = build_scales(&rank(&rows, "USA", 5), 600.0, 400.0, 0.3).expect("usa");
        let canada = build_scales(&rank(&rows, "Canada", 5), 600.0, 400.0, 0.3).expect("canada");

        axes.render_axes(&usa, Transition::new(0.0, 100.0).with_easing(Easing::Linear));
        axes.advance(100.0);
        let before = axes.state_at(100.0);
        let labels: Vec<&str> = before.value_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["$0", "$500", "$1,000"]);

        axes.render_axes(&canada, Transition::new(100.0, 100.0).with_easing(Easing::Linear));
        let mid = axes.state_at(150.0);
        let thousand = mid
            .value_ticks
            .iter()
            .find(|tick| tick.label == "$1,000")
            .expect("surviving tick");
        // 1000 moves from x=600 to x=300 under the doubled domain.
        assert!((thousand.position - 450.0).abs() <= 1e-9);

        axes.advance(200.0);
        let after = axes.state_at(200.0);
        let labels: Vec<&str> = after.value_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["$0", "$500", "$1,000", "$1,500", "$2,000"]);
        assert!(!axes.is_animating(200.0));
    }

    #[test]
    fn category_ticks_sit_on_band_centres() {
        let rows = vec![Row::new("A very long product name", "USA", 1.0).expect("row")];
        let scales = build_scales(&rank(&rows, "USA", 5), 600.0, 130.0, 0.3).expect("scales");
        let mut axes = AxisRenderer::new(AxisLabelConfig::default()).expect("axes");
        axes.render_axes(&scales, Transition::new(0.0, 0.0));

        let state = axes.state_at(0.0);
        assert_eq!(state.category_ticks.len(), 1);
        assert_eq!(state.category_ticks[0].label, "A very long pr…");
        assert!((state.category_ticks[0].position - 65.0).abs() <= 1e-9);
    }
}
