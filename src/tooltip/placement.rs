use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::clamp_lenient;
use crate::core::{Point, Rect, Size};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementSide {
    Above,
    Below,
    Left,
    Right,
}

/// Resolved tooltip box location relative to the annotated point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    /// Top-left corner of the box.
    pub location: Point,
    pub side: PlacementSide,
    /// `false` when no side fit and the least-overflowing one was taken.
    pub fits: bool,
}

impl TooltipPlacement {
    /// Places a `box_size` box `offset` pixels away from `target`.
    ///
    /// Vertical alignment prefers above, then below; horizontal prefers right,
    /// then left. The cross coordinate centers on the target and is clamped
    /// into `bounds`.
    pub fn resolve(
        target: Point,
        box_size: Size,
        bounds: Rect,
        align_vertically: bool,
        offset: f64,
    ) -> ChartResult<Self> {
        if !target.is_finite() || !offset.is_finite() || offset < 0.0 {
            return Err(ChartError::InvalidData(
                "tooltip target and offset must be finite, offset >= 0".to_owned(),
            ));
        }
        if !bounds.is_finite() || bounds.is_empty() {
            return Err(ChartError::InvalidData(
                "tooltip bounds must be finite and non-empty".to_owned(),
            ));
        }
        let box_size = box_size.validate()?;

        let candidates = if align_vertically {
            let x = clamp_lenient(
                target.x - box_size.width / 2.0,
                bounds.x,
                bounds.right() - box_size.width,
            );
            [
                (
                    PlacementSide::Above,
                    Point::new(x, target.y - box_size.height - offset),
                ),
                (PlacementSide::Below, Point::new(x, target.y + offset)),
            ]
        } else {
            let y = clamp_lenient(
                target.y - box_size.height / 2.0,
                bounds.y,
                bounds.bottom() - box_size.height,
            );
            [
                (PlacementSide::Right, Point::new(target.x + offset, y)),
                (
                    PlacementSide::Left,
                    Point::new(target.x - box_size.width - offset, y),
                ),
            ]
        };

        if let Some((side, location)) = candidates
            .iter()
            .copied()
            .find(|(_, location)| overflow(*location, box_size, bounds) == 0.0)
        {
            return Ok(Self {
                location,
                side,
                fits: true,
            });
        }

        let (side, location) = candidates
            .iter()
            .copied()
            .min_by_key(|(_, location)| OrderedFloat(overflow(*location, box_size, bounds)))
            .unwrap_or(candidates[0]);
        Ok(Self {
            location,
            side,
            fits: false,
        })
    }
}

/// Total distance the box sticks out of `bounds` across all four edges.
fn overflow(location: Point, size: Size, bounds: Rect) -> f64 {
    let left = (bounds.x - location.x).max(0.0);
    let top = (bounds.y - location.y).max(0.0);
    let right = (location.x + size.width - bounds.right()).max(0.0);
    let bottom = (location.y + size.height - bounds.bottom()).max(0.0);
    left + top + right + bottom
}
