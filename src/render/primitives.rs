use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one filled and/or stroked rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(rect: Rect, fill: Option<Color>, stroke: Color, stroke_width: f64) -> Self {
        Self {
            rect,
            fill,
            stroke,
            stroke_width,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.rect.is_finite() {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "rect stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        self.stroke.validate()
    }
}

/// Draw command for a polyline or polygon, e.g. a tooltip pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: SmallVec<[Point; 4]>,
    pub closed: bool,
    pub fill: Color,
}

impl PathPrimitive {
    #[must_use]
    pub fn closed(points: impl IntoIterator<Item = Point>, fill: Color) -> Self {
        Self {
            points: points.into_iter().collect(),
            closed: true,
            fill,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "path needs at least two points".to_owned(),
            ));
        }
        if self.points.iter().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.fill.validate()
    }
}
