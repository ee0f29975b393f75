use thiserror::Error;

use crate::annotations::AnnotationId;
use crate::core::AxisId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The value and its axis are both present and the axis is ready, yet the
    /// value can't be expressed against the axis domain.
    #[error("value `{value}` is not compatible with axis `{axis}`")]
    IncompatibleValue { value: String, axis: AxisId },

    /// Arrangement was requested before every plot value was resolved.
    #[error("annotation `{annotation}` is not updated and cannot be arranged")]
    NotUpdated { annotation: AnnotationId },

    #[error("padding writes are locked; schedule a padding change first")]
    PaddingLocked,

    #[error("unknown axis `{0}`")]
    UnknownAxis(AxisId),

    #[error("unknown annotation `{0}`")]
    UnknownAnnotation(AnnotationId),
}
