use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Style contract for the current render frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartStyle {
    pub background_color: Color,
    pub bar_color: Color,
    pub axis_line_color: Color,
    pub tick_mark_color: Color,
    pub axis_label_color: Color,
    pub axis_line_width: f64,
    pub tick_mark_length_px: f64,
    /// Gap between a tick mark's outer end and its label.
    pub tick_label_padding_px: f64,
    pub axis_label_font_size_px: f64,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(0xF8, 0xE5, 0x8C),
            bar_color: Color::from_rgb8(0x82, 0x20, 0x4A),
            axis_line_color: Color::rgb(0.0, 0.0, 0.0),
            tick_mark_color: Color::rgb(0.0, 0.0, 0.0),
            axis_label_color: Color::from_rgb8(0x3C, 0x75, 0x6C),
            axis_line_width: 1.0,
            tick_mark_length_px: 6.0,
            tick_label_padding_px: 3.0,
            axis_label_font_size_px: 12.0,
        }
    }
}

pub(super) fn validate_bar_chart_style(style: BarChartStyle) -> ChartResult<BarChartStyle> {
    style.background_color.validate()?;
    style.bar_color.validate()?;
    style.axis_line_color.validate()?;
    style.tick_mark_color.validate()?;
    style.axis_label_color.validate()?;

    for (name, value) in [
        ("axis_line_width", style.axis_line_width),
        ("axis_label_font_size_px", style.axis_label_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} must be finite and > 0"
            )));
        }
    }
    for (name, value) in [
        ("tick_mark_length_px", style.tick_mark_length_px),
        ("tick_label_padding_px", style.tick_label_padding_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    Ok(style)
}
