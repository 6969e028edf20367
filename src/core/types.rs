use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Canvas size in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 700)
    }
}

/// Fixed margins between the canvas edge and the plot body.
///
/// The left margin hosts category labels and the bottom margin hosts value
/// labels, which is why both are much larger than the other two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(10.0, 50.0, 130.0, 10.0)
    }
}

/// Resolved geometry of the plot body inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margins: Margins,
    pub body_width: f64,
    pub body_height: f64,
}

impl ChartLayout {
    /// Computes the body region as canvas size minus margins.
    pub fn new(viewport: Viewport, margins: Margins) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let margins = margins.validate()?;

        let body_width = f64::from(viewport.width) - margins.left - margins.right;
        let body_height = f64::from(viewport.height) - margins.top - margins.bottom;
        if body_width <= 0.0 || body_height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margins leave no plot body: body_width={body_width}, body_height={body_height}"
            )));
        }

        Ok(Self {
            viewport,
            margins,
            body_width,
            body_height,
        })
    }

    /// Canvas X of the body's left edge.
    #[must_use]
    pub fn body_left(self) -> f64 {
        self.margins.left
    }

    #[must_use]
    pub fn body_top(self) -> f64 {
        self.margins.top
    }

    /// Canvas Y of the body's bottom edge, where the value axis sits.
    #[must_use]
    pub fn body_bottom(self) -> f64 {
        f64::from(self.viewport.height) - self.margins.bottom
    }
}
