//! Chart annotations: value resolution against axes and screen arrangement.
//!
//! An [`Annotation`] resolves its two plot values through the axes it is bound
//! to, then arranges into a screen rectangle once [`Annotation::is_updated`]
//! holds. Point annotations size themselves through an
//! [`AnnotationPresenter`]; band annotations span the plot area across one
//! axis.

pub mod arrange;
mod desired_size;
mod model;
mod observer;
mod presenter;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub use arrange::{Arrangeable, CartesianBandArranger, CartesianPointArranger};
pub use desired_size::DesiredSizeCache;
pub use model::{
    Annotation, AnnotationKind, AnnotationShape, BandAnnotation, PlotSlot, PointAnnotation, Side,
};
pub use observer::{AnnotationEvent, AnnotationObserver, ObserverList};
pub use presenter::{AnnotationPresenter, GridTextPresenter, TextMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u32);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "annotation#{}", self.0)
    }
}

/// Paint settings handed to the render sink with each arranged annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::rgba(0.16, 0.38, 0.86, 0.18)),
            stroke: Color::rgb(0.16, 0.38, 0.86),
            stroke_width: 1.0,
        }
    }
}

impl AnnotationStyle {
    pub fn validate(self) -> ChartResult<Self> {
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        self.stroke.validate()?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "annotation stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
