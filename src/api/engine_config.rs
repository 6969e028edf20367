use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::axis::{
    AxisLabelConfig, DEFAULT_AXIS_TRANSITION_MS, DEFAULT_CATEGORY_LABEL_MAX_CHARS,
    DEFAULT_MAX_VALUE_TICKS, DEFAULT_VALUE_LABEL_PREFIX,
};
use crate::core::{ChartLayout, DEFAULT_BAND_PADDING, DEFAULT_TOP_N, Margins, Viewport};
use crate::data::CsvLoadOptions;
use crate::error::{ChartError, ChartResult};
use crate::scene::DEFAULT_BAR_TRANSITION_MS;

/// Group shown before the host makes a selection.
pub const DEFAULT_INITIAL_GROUP: &str = "United States of America";

/// Public engine bootstrap configuration.
///
/// Every field has a serde default, so a JSON document only needs the keys it
/// wants to override (`{}` is a valid config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    #[serde(default = "default_bar_transition_ms")]
    pub bar_transition_ms: f64,
    #[serde(default = "default_axis_transition_ms")]
    pub axis_transition_ms: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default = "default_max_value_ticks")]
    pub max_value_ticks: usize,
    #[serde(default = "default_category_label_max_chars")]
    pub category_label_max_chars: usize,
    #[serde(default = "default_value_label_prefix")]
    pub value_label_prefix: String,
    #[serde(default = "default_initial_group")]
    pub initial_group: String,
    #[serde(default)]
    pub csv: CsvLoadOptions,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            margins: Margins::default(),
            top_n: default_top_n(),
            band_padding: default_band_padding(),
            bar_transition_ms: default_bar_transition_ms(),
            axis_transition_ms: default_axis_transition_ms(),
            easing: Easing::default(),
            max_value_ticks: default_max_value_ticks(),
            category_label_max_chars: default_category_label_max_chars(),
            value_label_prefix: default_value_label_prefix(),
            initial_group: default_initial_group(),
            csv: CsvLoadOptions::default(),
        }
    }
}

impl ChartEngineConfig {
    /// Default config on a custom canvas.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets both bar and axis transition durations.
    #[must_use]
    pub fn with_transition_ms(mut self, bar_transition_ms: f64, axis_transition_ms: f64) -> Self {
        self.bar_transition_ms = bar_transition_ms;
        self.axis_transition_ms = axis_transition_ms;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn with_initial_group(mut self, group: impl Into<String>) -> Self {
        self.initial_group = group.into();
        self
    }

    #[must_use]
    pub fn with_csv_options(mut self, csv: CsvLoadOptions) -> Self {
        self.csv = csv;
        self
    }

    pub fn from_json_str(raw: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Resolves the plot body for this canvas and margins.
    pub fn layout(&self) -> ChartResult<ChartLayout> {
        ChartLayout::new(self.viewport, self.margins)
    }

    #[must_use]
    pub fn axis_label_config(&self) -> AxisLabelConfig {
        AxisLabelConfig {
            max_value_ticks: self.max_value_ticks,
            category_label_max_chars: self.category_label_max_chars,
            value_label_prefix: self.value_label_prefix.clone(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout()?;
        if self.top_n == 0 {
            return Err(ChartError::InvalidData("top_n must be > 0".to_owned()));
        }
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(
                "band_padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        for (name, duration) in [
            ("bar_transition_ms", self.bar_transition_ms),
            ("axis_transition_ms", self.axis_transition_ms),
        ] {
            if !duration.is_finite() || duration < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.initial_group.is_empty() {
            return Err(ChartError::InvalidData(
                "initial_group must not be empty".to_owned(),
            ));
        }
        self.axis_label_config().validate()?;
        self.csv.validate()
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_band_padding() -> f64 {
    DEFAULT_BAND_PADDING
}

fn default_bar_transition_ms() -> f64 {
    DEFAULT_BAR_TRANSITION_MS
}

fn default_axis_transition_ms() -> f64 {
    DEFAULT_AXIS_TRANSITION_MS
}

fn default_max_value_ticks() -> usize {
    DEFAULT_MAX_VALUE_TICKS
}

fn default_category_label_max_chars() -> usize {
    DEFAULT_CATEGORY_LABEL_MAX_CHARS
}

fn default_value_label_prefix() -> String {
    DEFAULT_VALUE_LABEL_PREFIX.to_owned()
}

fn default_initial_group() -> String {
    DEFAULT_INITIAL_GROUP.to_owned()
}
