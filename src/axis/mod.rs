//! Value and category axes derived from the current scales.

mod format;
mod renderer;

pub use format::{ELLIPSIS, format_currency, truncate_label};
pub use renderer::{
    AxisLabelConfig, AxisRenderer, AxisState, DEFAULT_AXIS_TRANSITION_MS,
    DEFAULT_CATEGORY_LABEL_MAX_CHARS, DEFAULT_MAX_VALUE_TICKS, DEFAULT_VALUE_LABEL_PREFIX,
    TickGeometry,
};
