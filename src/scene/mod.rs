//! Keyed scene graph of bars and its enter/update/exit reconciler.

mod reconciler;
mod visual_bar;

pub use reconciler::{DEFAULT_BAR_TRANSITION_MS, ReconcileSummary, SceneReconciler};
pub use visual_bar::{BarGeometry, BarPhase, VisualBar};
