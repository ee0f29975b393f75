//! chart-overlay: annotation arrangement and tooltip pointer geometry.
//!
//! Annotations resolve data-space values against axes and arrange into
//! screen rectangles under the host view's pan/zoom. Tooltips get a clamped
//! pointer triangle aimed at their target. Drawing stays behind the
//! [`render::Renderer`] sink.

pub mod annotations;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod tooltip;

pub use api::{AnnotationLayer, OverlayConfig};
pub use error::{ChartError, ChartResult};
