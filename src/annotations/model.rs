use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    Axis, AxisId, AxisPlotInfo, AxisRegistry, AxisType, AxisValue, Rect, Size, ViewTransform,
};
use crate::error::{ChartError, ChartResult};

use super::arrange::{Arrangeable, CartesianBandArranger, CartesianPointArranger};
use super::{
    AnnotationEvent, AnnotationId, AnnotationObserver, AnnotationPresenter, AnnotationStyle,
    DesiredSizeCache, ObserverList,
};

/// One of the two plot values an annotation carries.
///
/// Band annotations call these "from" (`First`) and "to" (`Second`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const FROM: Self = Self::First;
    pub const TO: Self = Self::Second;
    pub const BOTH: [Self; 2] = [Self::First, Self::Second];
}

/// Per-side binding and resolution state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSlot {
    value: Option<AxisValue>,
    axis: Option<AxisId>,
    plot_info: Option<AxisPlotInfo>,
    axis_type: Option<AxisType>,
    resolved: bool,
}

impl PlotSlot {
    #[must_use]
    pub fn value(&self) -> Option<&AxisValue> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn axis(&self) -> Option<AxisId> {
        self.axis
    }

    #[must_use]
    pub fn plot_info(&self) -> Option<AxisPlotInfo> {
        self.plot_info
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn invalidate(&mut self) {
        self.resolved = false;
        self.plot_info = None;
        self.axis_type = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointAnnotation {
    content: Option<String>,
    desired_size: DesiredSizeCache,
}

impl PointAnnotation {
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    #[must_use]
    pub fn desired_size_cache(&self) -> DesiredSizeCache {
        self.desired_size
    }

    fn desired_size(&mut self, owner: AnnotationId, presenter: &dyn AnnotationPresenter) -> Size {
        let content = self.content.as_deref();
        self.desired_size
            .get_or_measure(|| presenter.measure_content(owner, content))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandAnnotation;

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationShape {
    /// Anchored at one resolved position per axis.
    Point(PointAnnotation),
    /// Spans two resolved positions along a single axis.
    Band(BandAnnotation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    Point,
    Band,
}

/// Chart annotation bound to one or two axes.
///
/// The annotation is ready to arrange only once both sides resolved in the
/// current pass; see [`Annotation::is_updated`].
#[derive(Debug)]
pub struct Annotation {
    id: AnnotationId,
    shape: AnnotationShape,
    first: PlotSlot,
    second: PlotSlot,
    style: AnnotationStyle,
    z_index: i32,
    observers: ObserverList,
}

impl Annotation {
    #[must_use]
    pub fn point(id: AnnotationId) -> Self {
        Self::with_shape(id, AnnotationShape::Point(PointAnnotation::default()))
    }

    #[must_use]
    pub fn band(id: AnnotationId) -> Self {
        Self::with_shape(id, AnnotationShape::Band(BandAnnotation))
    }

    fn with_shape(id: AnnotationId, shape: AnnotationShape) -> Self {
        Self {
            id,
            shape,
            first: PlotSlot::default(),
            second: PlotSlot::default(),
            style: AnnotationStyle::default(),
            z_index: 0,
            observers: ObserverList::default(),
        }
    }

    /// Binds both axes of a point annotation before any value is attached.
    #[must_use]
    pub fn with_axes(mut self, first: AxisId, second: AxisId) -> Self {
        self.first.axis = Some(first);
        self.second.axis = Some(second);
        self
    }

    /// Binds the single axis of a band annotation before any value is attached.
    #[must_use]
    pub fn with_axis(self, axis: AxisId) -> Self {
        self.with_axes(axis, axis)
    }

    #[must_use]
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self.shape {
            AnnotationShape::Point(_) => AnnotationKind::Point,
            AnnotationShape::Band(_) => AnnotationKind::Band,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &AnnotationShape {
        &self.shape
    }

    #[must_use]
    pub fn slot(&self, side: Side) -> &PlotSlot {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut PlotSlot {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }

    #[must_use]
    pub fn style(&self) -> AnnotationStyle {
        self.style
    }

    pub fn set_style(&mut self, style: AnnotationStyle) -> ChartResult<()> {
        self.style = style.validate()?;
        self.observers.publish(AnnotationEvent::StyleChanged {
            annotation: self.id,
        });
        Ok(())
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    pub fn register_observer(&mut self, observer: Box<dyn AnnotationObserver>) -> ChartResult<()> {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.unregister(observer_id)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Both plot values resolved against ready axes.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        self.first.resolved && self.second.resolved
    }

    /// Attaches `value` to `side` and resolves that side only.
    pub fn set_value<A: Axis>(
        &mut self,
        side: Side,
        value: impl Into<AxisValue>,
        axes: &AxisRegistry<A>,
    ) -> ChartResult<()> {
        let slot = self.slot_mut(side);
        slot.value = Some(value.into());
        slot.invalidate();
        let resolved = self.resolve_side(side, axes);
        self.observers.publish(AnnotationEvent::ValueChanged {
            annotation: self.id,
            side,
        });
        resolved.map(|_| ())
    }

    pub fn clear_value(&mut self, side: Side) {
        let slot = self.slot_mut(side);
        slot.value = None;
        slot.invalidate();
        self.observers.publish(AnnotationEvent::ValueChanged {
            annotation: self.id,
            side,
        });
    }

    /// Rebinds the axis for `side`. Band annotations share one axis, so both
    /// sides are rebound regardless of `side`.
    /// Every affected side is rebound before any of them resolves.
    pub fn set_axis<A: Axis>(
        &mut self,
        side: Side,
        axis: Option<AxisId>,
        axes: &AxisRegistry<A>,
    ) -> ChartResult<()> {
        let affected = self.sides_bound_by(side);
        for &bound in &affected {
            let slot = self.slot_mut(bound);
            slot.axis = axis;
            slot.invalidate();
        }

        let mut resolved = Ok(());
        for &bound in &affected {
            if resolved.is_ok() {
                resolved = self.resolve_side(bound, axes).map(|_| ());
            }
            self.observers.publish(AnnotationEvent::AxisChanged {
                annotation: self.id,
                side: bound,
            });
        }
        resolved
    }

    fn sides_bound_by(&self, side: Side) -> Vec<Side> {
        match self.shape {
            AnnotationShape::Point(_) => vec![side],
            AnnotationShape::Band(_) => Side::BOTH.to_vec(),
        }
    }

    /// Re-resolves every side bound to `axis_id` after the axis finished an
    /// update. Returns `true` when any side is bound to it.
    pub fn on_axis_updated<A: Axis>(
        &mut self,
        axis_id: AxisId,
        axes: &AxisRegistry<A>,
    ) -> ChartResult<bool> {
        let mut bound = false;
        for side in Side::BOTH {
            if self.slot(side).axis != Some(axis_id) {
                continue;
            }
            bound = true;
            self.slot_mut(side).invalidate();
            self.resolve_side(side, axes)?;
        }
        Ok(bound)
    }

    /// Resolves every side that isn't resolved yet.
    pub fn update<A: Axis>(&mut self, axes: &AxisRegistry<A>) -> ChartResult<()> {
        for side in Side::BOTH {
            if !self.slot(side).resolved {
                self.resolve_side(side, axes)?;
            }
        }
        Ok(())
    }

    /// Clears both resolved flags; a fresh update must run before arranging.
    pub fn reset_state(&mut self) {
        self.first.invalidate();
        self.second.invalidate();
        self.observers.publish(AnnotationEvent::StateReset {
            annotation: self.id,
        });
    }

    /// Returns `Ok(true)` when resolved, `Ok(false)` when deferred.
    fn resolve_side<A: Axis>(&mut self, side: Side, axes: &AxisRegistry<A>) -> ChartResult<bool> {
        let annotation = self.id;
        let slot = self.slot_mut(side);
        let (Some(value), Some(axis_id)) = (slot.value.as_ref(), slot.axis) else {
            trace!(%annotation, ?side, "plot value deferred: value or axis missing");
            return Ok(false);
        };
        let Some(axis) = axes.get(axis_id) else {
            trace!(%annotation, ?side, axis = %axis_id, "plot value deferred: axis not registered");
            return Ok(false);
        };
        if !axis.is_ready() {
            trace!(%annotation, ?side, axis = %axis_id, "plot value deferred: axis not ready");
            return Ok(false);
        }
        let Some(plot_info) = axis.try_resolve(value) else {
            return Err(ChartError::IncompatibleValue {
                value: value.to_string(),
                axis: axis_id,
            });
        };

        slot.plot_info = Some(plot_info);
        slot.axis_type = Some(axis.axis_type());
        slot.resolved = true;
        self.observers
            .publish(AnnotationEvent::Resolved { annotation, side });
        Ok(true)
    }

    /// Replaces point content and drops the cached desired size.
    pub fn set_content(&mut self, content: Option<String>) -> ChartResult<()> {
        let AnnotationShape::Point(point) = &mut self.shape else {
            return Err(ChartError::InvalidData(format!(
                "{} is a band annotation and carries no content",
                self.id
            )));
        };
        point.content = content;
        point.desired_size.invalidate();
        self.observers.publish(AnnotationEvent::ContentChanged {
            annotation: self.id,
        });
        Ok(())
    }

    /// Computes the screen rectangle for this pass.
    ///
    /// Fails with [`ChartError::NotUpdated`] unless [`Self::is_updated`] holds.
    pub fn arrange(
        &mut self,
        layout_rect: Rect,
        view: &ViewTransform,
        presenter: &dyn AnnotationPresenter,
    ) -> ChartResult<Rect> {
        let not_updated = ChartError::NotUpdated {
            annotation: self.id,
        };
        if !self.is_updated() {
            return Err(not_updated);
        }
        let (Some(first), Some(second)) = (self.first.plot_info, self.second.plot_info) else {
            return Err(not_updated);
        };

        let rect = match &mut self.shape {
            AnnotationShape::Point(point) => {
                let desired_size = point.desired_size(self.id, presenter);
                CartesianPointArranger::new(desired_size).arrange(first, second, layout_rect, view)
            }
            AnnotationShape::Band(_) => {
                let Some(axis_type) = self.first.axis_type else {
                    return Err(not_updated);
                };
                CartesianBandArranger::new(axis_type).arrange(first, second, layout_rect, view)
            }
        };
        Ok(rect)
    }
}
