use serde::{Deserialize, Serialize};

use crate::annotations::{AnnotationStyle, TextMetrics};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::tooltip::PointerConfig;

/// Public overlay bootstrap configuration.
///
/// Serializable so hosts can persist and reload overlay setup; every field
/// except the viewport has a serde default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default = "default_point_style")]
    pub point_style: AnnotationStyle,
    #[serde(default = "default_band_style")]
    pub band_style: AnnotationStyle,
    #[serde(default = "default_pointer_fill")]
    pub pointer_fill: Color,
    #[serde(default = "default_tooltip_offset")]
    pub tooltip_offset: f64,
    #[serde(default)]
    pub text_metrics: TextMetrics,
}

impl OverlayConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: PointerConfig::default(),
            point_style: default_point_style(),
            band_style: default_band_style(),
            pointer_fill: default_pointer_fill(),
            tooltip_offset: default_tooltip_offset(),
            text_metrics: TextMetrics::default(),
        }
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerConfig) -> Self {
        self.pointer = pointer;
        self
    }

    #[must_use]
    pub fn with_point_style(mut self, style: AnnotationStyle) -> Self {
        self.point_style = style;
        self
    }

    #[must_use]
    pub fn with_band_style(mut self, style: AnnotationStyle) -> Self {
        self.band_style = style;
        self
    }

    #[must_use]
    pub fn with_tooltip_offset(mut self, offset: f64) -> Self {
        self.tooltip_offset = offset;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.pointer.validate()?;
        self.point_style.validate()?;
        self.band_style.validate()?;
        self.pointer_fill.validate()?;
        self.text_metrics.validate()?;
        if !self.tooltip_offset.is_finite() || self.tooltip_offset < 0.0 {
            return Err(ChartError::InvalidData(
                "tooltip offset must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_point_style() -> AnnotationStyle {
    AnnotationStyle {
        fill: Some(Color::rgba(1.0, 1.0, 1.0, 0.92)),
        stroke: Color::rgb(0.2, 0.2, 0.2),
        stroke_width: 1.0,
    }
}

fn default_band_style() -> AnnotationStyle {
    AnnotationStyle::default()
}

fn default_pointer_fill() -> Color {
    Color::rgba(1.0, 1.0, 1.0, 0.92)
}

fn default_tooltip_offset() -> f64 {
    6.0
}
