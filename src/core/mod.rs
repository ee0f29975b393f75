pub mod axis;
pub mod axis_registry;
pub mod geometry;
pub mod primitives;
pub mod scale;
pub mod view;

pub use axis::{Axis, AxisId, AxisKind, AxisPlotInfo, AxisType, AxisValue, ChartAxis};
pub use axis_registry::AxisRegistry;
pub use geometry::{Insets, Point, Rect, Size, Viewport};
pub use scale::LinearScale;
pub use view::{ChartView, StaticView, ViewTransform};
