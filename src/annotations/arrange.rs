use crate::core::{AxisPlotInfo, AxisType, Point, Rect, Size, ViewTransform};

/// Turns two resolved plot positions into a screen rectangle.
///
/// Implementations are pure: the same inputs always yield the same rect.
/// Cartesian arrangers live here; a polar arranger would project angle and
/// radius instead of using the `center_x`/`center_y` lookups.
pub trait Arrangeable {
    fn arrange(
        &self,
        first: AxisPlotInfo,
        second: AxisPlotInfo,
        layout_rect: Rect,
        view: &ViewTransform,
    ) -> Rect;
}

/// Point annotation: `first` resolves against the horizontal axis, `second`
/// against the vertical one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPointArranger {
    pub desired_size: Size,
}

impl CartesianPointArranger {
    #[must_use]
    pub fn new(desired_size: Size) -> Self {
        Self { desired_size }
    }
}

impl Arrangeable for CartesianPointArranger {
    fn arrange(
        &self,
        first: AxisPlotInfo,
        second: AxisPlotInfo,
        layout_rect: Rect,
        view: &ViewTransform,
    ) -> Rect {
        let virtual_rect = view.virtual_rect(layout_rect);
        let location = Point::new(
            view.pan_x + first.center_x(virtual_rect),
            view.pan_y + second.center_y(virtual_rect),
        );
        // The resolved point is the rect's top-left corner, not its center.
        Rect::from_location_size(location, self.desired_size)
    }
}

/// Band annotation spanning `from` to `to` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartesianBandArranger {
    pub axis_type: AxisType,
}

impl CartesianBandArranger {
    #[must_use]
    pub fn new(axis_type: AxisType) -> Self {
        Self { axis_type }
    }
}

impl Arrangeable for CartesianBandArranger {
    fn arrange(
        &self,
        from: AxisPlotInfo,
        to: AxisPlotInfo,
        layout_rect: Rect,
        view: &ViewTransform,
    ) -> Rect {
        let virtual_rect = view.virtual_rect(layout_rect);
        let (a, b) = match self.axis_type {
            AxisType::First => (
                Point::new(
                    view.pan_x + from.center_x(virtual_rect),
                    virtual_rect.y + view.pan_y,
                ),
                Point::new(
                    view.pan_x + to.center_x(virtual_rect),
                    virtual_rect.bottom() + view.pan_y,
                ),
            ),
            AxisType::Second => (
                Point::new(layout_rect.x, view.pan_y + from.center_y(virtual_rect)),
                Point::new(layout_rect.right(), view.pan_y + to.center_y(virtual_rect)),
            ),
        };
        Rect::from_points(a, b)
    }
}
