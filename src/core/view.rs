use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// Pan/zoom surface hosting the annotations.
///
/// Values are read fresh at the start of every arrangement pass; gestures may
/// change them between passes.
pub trait ChartView {
    fn zoom_width(&self) -> f64;
    fn zoom_height(&self) -> f64;
    fn pan_offset_x(&self) -> f64;
    fn pan_offset_y(&self) -> f64;
    fn viewport_width(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn plot_area_clip(&self) -> Rect;
}

/// Snapshot of the view's pan offset and zoom factor for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom_width: f64,
    pub zoom_height: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        pan_x: 0.0,
        pan_y: 0.0,
        zoom_width: 1.0,
        zoom_height: 1.0,
    };

    #[must_use]
    pub fn new(pan_x: f64, pan_y: f64, zoom_width: f64, zoom_height: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            zoom_width,
            zoom_height,
        }
    }

    #[must_use]
    pub fn capture(view: &dyn ChartView) -> Self {
        Self::new(
            view.pan_offset_x(),
            view.pan_offset_y(),
            view.zoom_width(),
            view.zoom_height(),
        )
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(ChartError::InvalidData(
                "pan offset must be finite".to_owned(),
            ));
        }
        if !self.zoom_width.is_finite()
            || !self.zoom_height.is_finite()
            || self.zoom_width <= 0.0
            || self.zoom_height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "zoom factors must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Plot area after zoom scaling, before pan offset.
    #[must_use]
    pub fn virtual_rect(self, layout_rect: Rect) -> Rect {
        layout_rect.scaled(self.zoom_width, self.zoom_height)
    }
}

/// Plain-data view for headless hosts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticView {
    pub transform: ViewTransform,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub plot_area: Rect,
}

impl StaticView {
    /// View whose plot area covers the whole viewport.
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            viewport_width,
            viewport_height,
            plot_area: Rect::new(0.0, 0.0, viewport_width, viewport_height),
        }
    }

    #[must_use]
    pub fn with_plot_area(mut self, plot_area: Rect) -> Self {
        self.plot_area = plot_area;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: ViewTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn pan_to(&mut self, pan_x: f64, pan_y: f64) {
        self.transform.pan_x = pan_x;
        self.transform.pan_y = pan_y;
    }

    pub fn zoom_to(&mut self, zoom_width: f64, zoom_height: f64) {
        self.transform.zoom_width = zoom_width;
        self.transform.zoom_height = zoom_height;
    }
}

impl ChartView for StaticView {
    fn zoom_width(&self) -> f64 {
        self.transform.zoom_width
    }

    fn zoom_height(&self) -> f64 {
        self.transform.zoom_height
    }

    fn pan_offset_x(&self) -> f64 {
        self.transform.pan_x
    }

    fn pan_offset_y(&self) -> f64 {
        self.transform.pan_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn plot_area_clip(&self) -> Rect {
        self.plot_area
    }
}
