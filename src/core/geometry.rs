use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Output surface size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

    /// Full-surface rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Axis-aligned rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle whose top-left corner is `location`.
    #[must_use]
    pub fn from_location_size(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Builds the rectangle spanned by two corners in any order.
    ///
    /// Width and height are always non-negative.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Scales the size in place. The origin is left untouched.
    #[must_use]
    pub fn scaled(self, zoom_width: f64, zoom_height: f64) -> Self {
        Self::new(
            self.x,
            self.y,
            self.width * zoom_width,
            self.height * zoom_height,
        )
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Four-sided padding of a container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Adds `delta` to every side.
    #[must_use]
    pub fn grow(self, delta: f64) -> Self {
        Self::new(
            self.left + delta,
            self.top + delta,
            self.right + delta,
            self.bottom + delta,
        )
    }

    #[must_use]
    pub fn is_uniform(self) -> bool {
        self.left == self.top && self.top == self.right && self.right == self.bottom
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "padding `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_normalizes_reversed_corners() {
        let rect = Rect::from_points(Point::new(90.0, 100.0), Point::new(10.0, 0.0));
        assert_eq!(rect, Rect::new(10.0, 0.0, 80.0, 100.0));
    }

    #[test]
    fn scaled_keeps_origin() {
        let rect = Rect::new(5.0, 7.0, 100.0, 50.0).scaled(2.0, 3.0);
        assert_eq!(rect, Rect::new(5.0, 7.0, 200.0, 150.0));
    }

    #[test]
    fn grow_adds_to_every_side() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0).grow(5.0);
        assert_eq!(insets, Insets::new(6.0, 7.0, 8.0, 9.0));
        assert!(Insets::uniform(3.0).is_uniform());
        assert!(!insets.is_uniform());
    }
}
