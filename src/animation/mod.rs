//! Time-based interpolation decoupled from reconciliation decisions.
//!
//! A [`Tween`] is pure data: it never reads a clock. Callers sample it with an
//! explicit timestamp, which makes every animation reproducible in tests with
//! a [`ManualClock`].

mod clock;
mod easing;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use easing::Easing;

use serde::{Deserialize, Serialize};

/// Timing shared by every tween started in one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Transition {
    #[must_use]
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn end_ms(self) -> f64 {
        self.start_ms + self.duration_ms.max(0.0)
    }

    /// Eased progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(self, now_ms: f64) -> f64 {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        let linear = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.easing.apply(linear)
    }
}

/// One scalar animated from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub transition: Transition,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, transition: Transition) -> Self {
        Self {
            from,
            to,
            transition,
        }
    }

    /// A tween already at rest on `value`.
    #[must_use]
    pub fn settled(value: f64) -> Self {
        Self::new(value, value, Transition::new(0.0, 0.0))
    }

    #[must_use]
    pub fn value_at(self, now_ms: f64) -> f64 {
        let progress = self.transition.progress(now_ms);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * progress
    }

    #[must_use]
    pub fn is_finished(self, now_ms: f64) -> bool {
        now_ms >= self.transition.end_ms()
    }

    /// Restarts toward `to` from wherever the tween is at `transition.start_ms`.
    #[must_use]
    pub fn retarget(self, to: f64, transition: Transition) -> Self {
        Self::new(self.value_at(transition.start_ms), to, transition)
    }
}
