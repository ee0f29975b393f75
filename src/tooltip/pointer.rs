use serde::{Deserialize, Serialize};

use crate::core::primitives::clamp_lenient;
use crate::core::{Insets, Point, Rect, Size};
use crate::error::{ChartError, ChartResult};

use super::{PointerConfig, TooltipPlacement};

/// Box edge the pointer leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Closed triangle in box-local coordinates: base start, tip, base end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPath {
    base_start: Point,
    tip: Point,
    base_end: Point,
    edge: PointerEdge,
}

impl PointerPath {
    #[must_use]
    pub fn points(&self) -> [Point; 3] {
        [self.base_start, self.tip, self.base_end]
    }

    #[must_use]
    pub fn tip(&self) -> Point {
        self.tip
    }

    #[must_use]
    pub fn base(&self) -> (Point, Point) {
        (self.base_start, self.base_end)
    }

    #[must_use]
    pub fn edge(&self) -> PointerEdge {
        self.edge
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        let [a, b, c] = self.points();
        let left = a.x.min(b.x).min(c.x);
        let top = a.y.min(b.y).min(c.y);
        let right = a.x.max(b.x).max(c.x);
        let bottom = a.y.max(b.y).max(c.y);
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Same triangle shifted by `origin`, e.g. into the container's space.
    #[must_use]
    pub fn translated(self, origin: Point) -> Self {
        let shift = |point: Point| Point::new(point.x + origin.x, point.y + origin.y);
        Self {
            base_start: shift(self.base_start),
            tip: shift(self.tip),
            base_end: shift(self.base_end),
            edge: self.edge,
        }
    }
}

/// Tooltip box state that owns the pointer and the padding reserved for it.
///
/// Every pointer size or margin change grows all four padding sides by the
/// absolute difference, so the sides stay equal when they start equal.
/// Padding can only be written after [`PointerLayout::schedule_padding_change`]
/// arms the one-shot latch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerLayout {
    pointer_size: u32,
    pointer_margin: u32,
    align_vertically: bool,
    target_location: Point,
    container_location: Point,
    measured: Size,
    padding: Insets,
    padding_change_scheduled: bool,
}

impl Default for PointerLayout {
    fn default() -> Self {
        Self {
            pointer_size: 0,
            pointer_margin: 0,
            align_vertically: true,
            target_location: Point::default(),
            container_location: Point::default(),
            measured: Size::default(),
            padding: Insets::default(),
            padding_change_scheduled: false,
        }
    }
}

impl PointerLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the configured base padding and applies size and margin
    /// through the regular mutators.
    pub fn from_config(config: &PointerConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let mut layout = Self {
            align_vertically: config.align_vertically,
            ..Self::default()
        };
        layout.schedule_padding_change();
        layout.set_padding(Insets::uniform(config.base_padding))?;
        layout.set_pointer_size(config.pointer_size);
        layout.set_tooltip_margin(config.pointer_margin);
        Ok(layout)
    }

    #[must_use]
    pub fn pointer_size(&self) -> u32 {
        self.pointer_size
    }

    #[must_use]
    pub fn tooltip_margin(&self) -> u32 {
        self.pointer_margin
    }

    #[must_use]
    pub fn align_vertically(&self) -> bool {
        self.align_vertically
    }

    #[must_use]
    pub fn target_location(&self) -> Point {
        self.target_location
    }

    #[must_use]
    pub fn container_location(&self) -> Point {
        self.container_location
    }

    #[must_use]
    pub fn measured_size(&self) -> Size {
        self.measured
    }

    #[must_use]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    #[must_use]
    pub fn is_padding_change_scheduled(&self) -> bool {
        self.padding_change_scheduled
    }

    pub fn set_pointer_size(&mut self, pointer_size: u32) {
        let delta = self.pointer_size.abs_diff(pointer_size);
        self.pointer_size = pointer_size;
        self.grow_padding(delta);
    }

    pub fn set_tooltip_margin(&mut self, pointer_margin: u32) {
        let delta = self.pointer_margin.abs_diff(pointer_margin);
        self.pointer_margin = pointer_margin;
        self.grow_padding(delta);
    }

    pub fn set_align_vertically(&mut self, align_vertically: bool) {
        self.align_vertically = align_vertically;
    }

    pub fn set_target_location(&mut self, target_location: Point) {
        self.target_location = target_location;
    }

    pub fn set_container_location(&mut self, container_location: Point) {
        self.container_location = container_location;
    }

    pub fn measure(&mut self, size: Size) -> ChartResult<()> {
        self.measured = size.validate()?;
        Ok(())
    }

    /// Arms the latch for exactly one padding write.
    pub fn schedule_padding_change(&mut self) {
        self.padding_change_scheduled = true;
    }

    pub fn set_padding(&mut self, padding: Insets) -> ChartResult<()> {
        if !self.take_padding_latch() {
            return Err(ChartError::PaddingLocked);
        }
        self.padding = padding.validate()?;
        Ok(())
    }

    fn take_padding_latch(&mut self) -> bool {
        std::mem::take(&mut self.padding_change_scheduled)
    }

    fn grow_padding(&mut self, delta: u32) {
        self.schedule_padding_change();
        if self.take_padding_latch() {
            self.padding = self.padding.grow(f64::from(delta));
        }
    }

    /// Places the box next to `target` inside `bounds` using the measured
    /// size, and records both locations.
    pub fn place_near(
        &mut self,
        target: Point,
        bounds: Rect,
        offset: f64,
    ) -> ChartResult<TooltipPlacement> {
        let placement = TooltipPlacement::resolve(
            target,
            self.measured,
            bounds,
            self.align_vertically,
            offset,
        )?;
        self.target_location = target;
        self.container_location = placement.location;
        Ok(placement)
    }

    /// Pointer triangle aimed at the target, `None` when the pointer has no
    /// size.
    #[must_use]
    pub fn pointer_path(&self) -> Option<PointerPath> {
        if self.pointer_size == 0 {
            return None;
        }
        Some(if self.align_vertically {
            self.vertical_path()
        } else {
            self.horizontal_path()
        })
    }

    fn vertical_path(&self) -> PointerPath {
        let size = f64::from(self.pointer_size);
        let Size { width, height } = self.measured;
        // Sides are equal by construction, so the left inset serves all four.
        let inset = self.padding.left;
        let draw_below = self.container_location.y + height <= self.target_location.y;

        let anchor_x = clamp_lenient(
            self.target_location.x - self.container_location.x,
            inset,
            width - inset,
        );
        let (anchor_y, tip_y, edge) = if draw_below {
            let anchor_y = height - inset;
            (anchor_y, anchor_y + size, PointerEdge::Bottom)
        } else {
            (inset, inset - size, PointerEdge::Top)
        };

        let half_left = size.min(anchor_x - inset).max(0.0);
        let half_right = size.min(width - inset - anchor_x).max(0.0);
        PointerPath {
            base_start: Point::new(anchor_x - half_left, anchor_y),
            tip: Point::new(anchor_x, tip_y),
            base_end: Point::new(anchor_x + half_right, anchor_y),
            edge,
        }
    }

    fn horizontal_path(&self) -> PointerPath {
        let size = f64::from(self.pointer_size);
        let Size { width, height } = self.measured;
        let inset = self.padding.top;
        let draw_right = self.container_location.x + width <= self.target_location.x;

        let relative_y = self.target_location.y - self.container_location.y;
        let center = height / 2.0;
        let (low, high) = if relative_y < center {
            (inset, center)
        } else {
            (center, height - inset)
        };
        let anchor_y = clamp_lenient(
            clamp_lenient(relative_y, low, high),
            inset,
            height - inset,
        );
        let (anchor_x, tip_x, edge) = if draw_right {
            let anchor_x = width - inset;
            (anchor_x, anchor_x + size, PointerEdge::Right)
        } else {
            (inset, inset - size, PointerEdge::Left)
        };

        let half_up = size.min(anchor_y - inset).max(0.0);
        let half_down = size.min(height - inset - anchor_y).max(0.0);
        PointerPath {
            base_start: Point::new(anchor_x, anchor_y - half_up),
            tip: Point::new(tip_x, anchor_y),
            base_end: Point::new(anchor_x, anchor_y + half_down),
            edge,
        }
    }
}
