//! Tooltip box placement and pointer geometry.

mod placement;
mod pointer;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub use placement::{PlacementSide, TooltipPlacement};
pub use pointer::{PointerEdge, PointerLayout, PointerPath};

/// Serializable pointer setup applied by [`PointerLayout::from_config`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerConfig {
    #[serde(default = "default_pointer_size")]
    pub pointer_size: u32,
    #[serde(default = "default_pointer_margin")]
    pub pointer_margin: u32,
    #[serde(default = "default_align_vertically")]
    pub align_vertically: bool,
    #[serde(default)]
    pub base_padding: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            pointer_size: default_pointer_size(),
            pointer_margin: default_pointer_margin(),
            align_vertically: default_align_vertically(),
            base_padding: 0.0,
        }
    }
}

impl PointerConfig {
    pub fn validate(&self) -> ChartResult<Self> {
        if !self.base_padding.is_finite() || self.base_padding < 0.0 {
            return Err(ChartError::InvalidData(
                "pointer base padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(*self)
    }
}

fn default_pointer_size() -> u32 {
    8
}

fn default_pointer_margin() -> u32 {
    4
}

fn default_align_vertically() -> bool {
    true
}
