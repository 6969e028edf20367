//! Public engine facade: configuration, selection control, frame building.

mod engine;
mod engine_config;
mod engine_snapshot;
mod render_frame_builder;
mod render_style;
mod selection_controller;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, DEFAULT_INITIAL_GROUP};
pub use engine_snapshot::EngineSnapshot;
pub use render_style::BarChartStyle;
