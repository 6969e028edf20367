use serde::{Deserialize, Serialize};

use crate::animation::Clock;
use crate::axis::AxisState;
use crate::core::{ChartLayout, RankedSet};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::scene::BarGeometry;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub now_ms: f64,
    pub layout: ChartLayout,
    pub loaded: bool,
    pub selected_group: String,
    pub ranked: RankedSet,
    pub value_domain: Option<(f64, f64)>,
    pub bars: Vec<BarGeometry>,
    pub axes: AxisState,
    pub animating: bool,
}

impl<R: Renderer, C: Clock> ChartEngine<R, C> {
    /// Captures the engine state at the current clock time.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let now_ms = self.clock.now_ms();
        EngineSnapshot {
            now_ms,
            layout: self.layout,
            loaded: self.is_loaded(),
            selected_group: self.selected_group.clone(),
            ranked: self.ranked.clone(),
            value_domain: self.scales.as_ref().map(|scales| scales.value.domain()),
            bars: self.scene.bars_at(now_ms),
            axes: self.axes.state_at(now_ms),
            animating: self.is_animating(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
