use tracing::debug;

use crate::animation::{Clock, MonotonicClock};
use crate::axis::{AxisRenderer, AxisState};
use crate::core::{ChartLayout, ChartScales, RankedSet};
use crate::data::Dataset;
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::scene::{BarGeometry, SceneReconciler};

use super::render_style::validate_bar_chart_style;
use super::{BarChartStyle, ChartEngineConfig};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the loaded dataset, the current selection and every
/// piece of derived state (ranked set, scales, bar scene, axes). Hosts feed
/// it a dataset and selection events, then call [`ChartEngine::advance`] and
/// [`ChartEngine::render`] once per animation frame.
pub struct ChartEngine<R: Renderer, C: Clock = MonotonicClock> {
    pub(super) renderer: R,
    pub(super) clock: C,
    pub(super) config: ChartEngineConfig,
    pub(super) layout: ChartLayout,
    pub(super) style: BarChartStyle,
    pub(super) dataset: Option<Dataset>,
    pub(super) selected_group: String,
    pub(super) ranked: RankedSet,
    pub(super) scales: Option<ChartScales>,
    pub(super) scene: SceneReconciler,
    pub(super) axes: AxisRenderer,
}

impl<R: Renderer> ChartEngine<R, MonotonicClock> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        Self::with_clock(renderer, config, MonotonicClock::new())
    }
}

impl<R: Renderer, C: Clock> ChartEngine<R, C> {
    /// Creates an engine driven by an injected clock.
    pub fn with_clock(renderer: R, config: ChartEngineConfig, clock: C) -> ChartResult<Self> {
        config.validate()?;
        let layout = config.layout()?;
        let axes = AxisRenderer::new(config.axis_label_config())?;
        let selected_group = config.initial_group.clone();
        debug!(
            width = layout.viewport.width,
            height = layout.viewport.height,
            body_width = layout.body_width,
            body_height = layout.body_height,
            initial_group = %selected_group,
            "chart engine initialized"
        );

        Ok(Self {
            renderer,
            clock,
            config,
            layout,
            style: BarChartStyle::default(),
            dataset: None,
            ranked: RankedSet::empty(selected_group.clone()),
            selected_group,
            scales: None,
            scene: SceneReconciler::new(),
            axes,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn style(&self) -> BarChartStyle {
        self.style
    }

    pub fn set_style(&mut self, style: BarChartStyle) -> ChartResult<()> {
        self.style = validate_bar_chart_style(style)?;
        Ok(())
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// `true` once a dataset has been installed; rendering is gated on it.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Selectable groups in dataset order; empty until loaded.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        self.dataset.as_ref().map(Dataset::groups).unwrap_or_default()
    }

    #[must_use]
    pub fn selected_group(&self) -> &str {
        &self.selected_group
    }

    #[must_use]
    pub fn ranked_set(&self) -> &RankedSet {
        &self.ranked
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ChartScales> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn scene(&self) -> &SceneReconciler {
        &self.scene
    }

    /// Bars sampled at the current clock time.
    #[must_use]
    pub fn bars(&self) -> Vec<BarGeometry> {
        self.scene.bars_at(self.clock.now_ms())
    }

    /// Axes sampled at the current clock time.
    #[must_use]
    pub fn axis_state(&self) -> AxisState {
        self.axes.state_at(self.clock.now_ms())
    }

    /// Samples the scene at the current clock time and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
