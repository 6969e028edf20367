use crate::animation::Clock;
use crate::axis::AxisState;
use crate::render::{
    LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::ChartEngine;

/// Ticks further than this outside the body are culled while they slide away.
const TICK_CULL_TOLERANCE_PX: f64 = 0.5;

impl<R: Renderer, C: Clock> ChartEngine<R, C> {
    /// Builds the frame for the current clock time.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        self.build_render_frame_at(self.clock.now_ms())
    }

    /// Builds the frame for an explicit instant.
    ///
    /// Until a dataset is loaded the frame only carries the background.
    #[must_use]
    pub fn build_render_frame_at(&self, now_ms: f64) -> RenderFrame {
        let mut frame =
            RenderFrame::new(self.layout.viewport).with_background(self.style.background_color);
        if self.dataset.is_none() || self.scales.is_none() {
            return frame;
        }

        let body_left = self.layout.body_left();
        let body_top = self.layout.body_top();
        for bar in self.scene.bars_at(now_ms) {
            if bar.width <= 0.0 || bar.height <= 0.0 {
                continue;
            }
            frame.rects.push(RectPrimitive::new(
                body_left,
                body_top + bar.position,
                bar.width,
                bar.height,
                self.style.bar_color,
            ));
        }

        let axes = self.axes.state_at(now_ms);
        self.append_value_axis(&mut frame, &axes);
        self.append_category_axis(&mut frame, &axes);
        frame
    }

    fn append_value_axis(&self, frame: &mut RenderFrame, axes: &AxisState) {
        let style = self.style;
        let left = self.layout.body_left();
        let right = left + self.layout.body_width;
        let bottom = self.layout.body_bottom();

        frame.lines.push(LinePrimitive::new(
            left,
            bottom,
            right,
            bottom,
            style.axis_line_width,
            style.axis_line_color,
        ));

        let tick_end_y = bottom + style.tick_mark_length_px;
        let label_y = tick_end_y + style.tick_label_padding_px + style.axis_label_font_size_px / 2.0;
        for tick in &axes.value_ticks {
            if tick.opacity <= 0.0
                || tick.position < -TICK_CULL_TOLERANCE_PX
                || tick.position > self.layout.body_width + TICK_CULL_TOLERANCE_PX
            {
                continue;
            }
            let x = left + tick.position;
            frame.lines.push(LinePrimitive::new(
                x,
                bottom,
                x,
                tick_end_y,
                style.axis_line_width,
                style.tick_mark_color.with_opacity(tick.opacity),
            ));
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                x,
                label_y,
                style.axis_label_font_size_px,
                style.axis_label_color.with_opacity(tick.opacity),
                TextHAlign::Center,
            ));
        }
    }

    fn append_category_axis(&self, frame: &mut RenderFrame, axes: &AxisState) {
        let style = self.style;
        let left = self.layout.body_left();
        let top = self.layout.body_top();

        frame.lines.push(LinePrimitive::new(
            left,
            top,
            left,
            top + self.layout.body_height,
            style.axis_line_width,
            style.axis_line_color,
        ));

        let tick_start_x = left - style.tick_mark_length_px;
        let label_x = tick_start_x - style.tick_label_padding_px;
        for tick in &axes.category_ticks {
            if tick.opacity <= 0.0 {
                continue;
            }
            let y = top + tick.position;
            frame.lines.push(LinePrimitive::new(
                tick_start_x,
                y,
                left,
                y,
                style.axis_line_width,
                style.tick_mark_color.with_opacity(tick.opacity),
            ));
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                label_x,
                y,
                style.axis_label_font_size_px,
                style.axis_label_color.with_opacity(tick.opacity),
                TextHAlign::Right,
            ));
        }
    }
}
