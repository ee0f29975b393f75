mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, PathPrimitive, RectPrimitive};

use crate::error::ChartResult;

/// Drawing sink implemented by host backends.
///
/// Backends receive a fully materialized `RenderFrame`, so paint calls stay
/// out of the annotation and pointer geometry code.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
