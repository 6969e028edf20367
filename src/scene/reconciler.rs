use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::animation::Transition;
use crate::core::{ChartScales, RankedSet};

use super::visual_bar::{BarGeometry, BarPhase, BarTargets, VisualBar};

/// Default duration of bar transitions.
pub const DEFAULT_BAR_TRANSITION_MS: f64 = 700.0;

/// Classification produced by one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Categories that got a new bar.
    pub entered: Vec<String>,
    /// Categories whose bar was retargeted.
    pub updated: Vec<String>,
    /// Subset of `updated` whose bar was exiting and got revived.
    pub reentered: Vec<String>,
    /// Categories whose bar already had the requested targets.
    pub unchanged: Vec<String>,
    /// Categories whose bar started exiting in this pass.
    pub exited: Vec<String>,
}

impl ReconcileSummary {
    /// `true` when the pass started no animation at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.exited.is_empty()
    }
}

/// Owner of the keyed bar scene.
///
/// Every mutation of the bar set goes through [`SceneReconciler::reconcile`]
/// and [`SceneReconciler::advance`].
#[derive(Debug, Clone, Default)]
pub struct SceneReconciler {
    bars: IndexMap<String, VisualBar>,
}

impl SceneReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffs the scene against `ranked`, keyed by category.
    ///
    /// New categories enter at zero width, known ones are retargeted from
    /// their current sampled geometry, and missing ones start exiting. Every
    /// animation started here shares `transition`.
    pub fn reconcile(
        &mut self,
        ranked: &RankedSet,
        scales: &ChartScales,
        transition: Transition,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let height = scales.category.bandwidth();

        for row in ranked.iter() {
            let category = row.category();
            let Some(position) = scales.position(category) else {
                warn!(category, "category missing from band scale, skipping bar");
                continue;
            };
            let targets = BarTargets {
                width: scales.length(row.value()),
                position,
                height,
            };

            match self.bars.get_mut(category) {
                None => {
                    self.bars.insert(
                        category.to_owned(),
                        VisualBar::enter(category, row.value(), targets, transition),
                    );
                    summary.entered.push(category.to_owned());
                }
                Some(bar) => {
                    let was_exiting = bar.phase() == BarPhase::Exiting;
                    if bar.update(row.value(), targets, transition) {
                        if was_exiting {
                            summary.reentered.push(category.to_owned());
                        }
                        summary.updated.push(category.to_owned());
                    } else {
                        summary.unchanged.push(category.to_owned());
                    }
                }
            }
        }

        for (category, bar) in &mut self.bars {
            if ranked.get(category).is_some() || bar.phase() == BarPhase::Exiting {
                continue;
            }
            bar.exit(transition);
            summary.exited.push(category.clone());
        }

        debug!(
            group = ranked.group(),
            entered = summary.entered.len(),
            updated = summary.updated.len(),
            reentered = summary.reentered.len(),
            unchanged = summary.unchanged.len(),
            exited = summary.exited.len(),
            "reconciled bar scene"
        );
        summary
    }

    /// Drops bars whose exit finished and settles bars at rest.
    ///
    /// Returns the removed categories. Removal re-checks the phase, so a bar
    /// revived by a later pass is never deleted by its earlier exit.
    pub fn advance(&mut self, now_ms: f64) -> Vec<String> {
        let mut removed = Vec::new();
        self.bars.retain(|category, bar| {
            if bar.is_exit_complete(now_ms) {
                removed.push(category.clone());
                return false;
            }
            bar.settle(now_ms);
            true
        });
        if !removed.is_empty() {
            trace!(count = removed.len(), "removed exited bars");
        }
        removed
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.bars
            .values()
            .any(|bar| !bar.is_at_rest(now_ms) || bar.phase() == BarPhase::Exiting)
    }

    /// Samples every bar at `now_ms`, in scene order.
    #[must_use]
    pub fn bars_at(&self, now_ms: f64) -> Vec<BarGeometry> {
        self.bars
            .values()
            .map(|bar| bar.geometry_at(now_ms))
            .collect()
    }

    #[must_use]
    pub fn bar(&self, category: &str) -> Option<&VisualBar> {
        self.bars.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualBar> {
        self.bars.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn clear(&mut self) {
        self.bars.clear();
    }
}
