//! barchart-rs: animated top-N bar chart engine.
//!
//! A dataset of `(group, category, value)` rows is ranked per selected group,
//! mapped through a linear and a band scale, and bound to a persistent scene
//! of bars with a keyed enter/update/exit reconciler. Rendering goes through
//! backend-agnostic frames.

pub mod animation;
pub mod api;
pub mod axis;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
