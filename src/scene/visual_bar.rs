use serde::{Deserialize, Serialize};

use crate::animation::{Transition, Tween};

/// Lifecycle stage of a bar within the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarPhase {
    /// Created by the latest pass, growing from zero width.
    Entering,
    /// Bound to new data, moving toward new targets.
    Updating,
    /// Animations finished; geometry equals its targets.
    Settled,
    /// No longer in the ranked set; shrinking until removal.
    Exiting,
}

/// Geometry targets resolved from the scales for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct BarTargets {
    pub width: f64,
    pub position: f64,
    pub height: f64,
}

const TARGET_EPSILON: f64 = 1e-9;

impl BarTargets {
    fn matches(self, bar: &VisualBar) -> bool {
        (bar.width.to - self.width).abs() <= TARGET_EPSILON
            && (bar.position.to - self.position).abs() <= TARGET_EPSILON
            && (bar.height.to - self.height).abs() <= TARGET_EPSILON
    }
}

/// Persistent visual element bound to one category.
///
/// Width runs along the value axis, position and height along the band axis,
/// all in body-relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualBar {
    category: String,
    value: f64,
    phase: BarPhase,
    width: Tween,
    position: Tween,
    height: Tween,
}

/// Sampled state of one bar at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub category: String,
    pub value: f64,
    pub phase: BarPhase,
    pub width: f64,
    pub position: f64,
    pub height: f64,
}

impl VisualBar {
    pub(super) fn enter(
        category: &str,
        value: f64,
        targets: BarTargets,
        transition: Transition,
    ) -> Self {
        Self {
            category: category.to_owned(),
            value,
            phase: BarPhase::Entering,
            width: Tween::new(0.0, targets.width, transition),
            position: Tween::settled(targets.position),
            height: Tween::settled(targets.height),
        }
    }

    /// Rebinds to new data. Returns `false` when nothing had to be restarted.
    pub(super) fn update(&mut self, value: f64, targets: BarTargets, transition: Transition) -> bool {
        self.value = value;
        if self.phase != BarPhase::Exiting && targets.matches(self) {
            return false;
        }

        self.width = self.width.retarget(targets.width, transition);
        self.position = self.position.retarget(targets.position, transition);
        self.height = self.height.retarget(targets.height, transition);
        self.phase = BarPhase::Updating;
        true
    }

    /// Starts shrinking to zero width, holding the band where it currently is.
    pub(super) fn exit(&mut self, transition: Transition) {
        self.width = self.width.retarget(0.0, transition);
        self.position = Tween::settled(self.position.value_at(transition.start_ms));
        self.height = Tween::settled(self.height.value_at(transition.start_ms));
        self.phase = BarPhase::Exiting;
    }

    /// Marks entering/updating bars as settled once every tween finished.
    pub(super) fn settle(&mut self, now_ms: f64) {
        if matches!(self.phase, BarPhase::Entering | BarPhase::Updating)
            && self.is_at_rest(now_ms)
        {
            self.phase = BarPhase::Settled;
        }
    }

    /// An exiting bar whose shrink animation completed.
    #[must_use]
    pub fn is_exit_complete(&self, now_ms: f64) -> bool {
        self.phase == BarPhase::Exiting && self.width.is_finished(now_ms)
    }

    #[must_use]
    pub fn is_at_rest(&self, now_ms: f64) -> bool {
        self.width.is_finished(now_ms)
            && self.position.is_finished(now_ms)
            && self.height.is_finished(now_ms)
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Value of the datum currently bound to this bar.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn phase(&self) -> BarPhase {
        self.phase
    }

    #[must_use]
    pub fn width(&self) -> Tween {
        self.width
    }

    #[must_use]
    pub fn position(&self) -> Tween {
        self.position
    }

    #[must_use]
    pub fn height(&self) -> Tween {
        self.height
    }

    #[must_use]
    pub fn geometry_at(&self, now_ms: f64) -> BarGeometry {
        BarGeometry {
            category: self.category.clone(),
            value: self.value,
            phase: self.phase,
            width: self.width.value_at(now_ms),
            position: self.position.value_at(now_ms),
            height: self.height.value_at(now_ms),
        }
    }
}
