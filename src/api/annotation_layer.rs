use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::annotations::{
    Annotation, AnnotationId, AnnotationKind, AnnotationPresenter, AnnotationStyle,
    GridTextPresenter, Side,
};
use crate::core::{
    Axis, AxisId, AxisRegistry, AxisValue, ChartAxis, ChartView, Point, Rect, ViewTransform,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{PathPrimitive, RectPrimitive, RenderFrame, Renderer};
use crate::tooltip::{PointerLayout, TooltipPlacement};

use super::OverlayConfig;

/// Screen placement of one annotation for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangedAnnotation {
    pub id: AnnotationId,
    pub kind: AnnotationKind,
    pub rect: Rect,
    pub style: AnnotationStyle,
    pub z_index: i32,
}

/// Result of one arrangement pass, in draw order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerArrangement {
    /// Index of the presenting collection this layer draws into.
    pub collection_index: usize,
    pub transform: ViewTransform,
    pub annotations: Vec<ArrangedAnnotation>,
    /// Annotations left out of this pass because they weren't updated.
    pub skipped: Vec<AnnotationId>,
}

impl LayerArrangement {
    #[must_use]
    pub fn get(&self, id: AnnotationId) -> Option<&ArrangedAnnotation> {
        self.annotations.iter().find(|arranged| arranged.id == id)
    }
}

/// Owns axes and annotations and runs synchronous layout passes.
///
/// A pass is `update_pass` followed by `arrange_pass`; only annotations whose
/// plot values all resolved are arranged, the rest are skipped whole.
#[derive(Debug)]
pub struct AnnotationLayer<A: Axis = ChartAxis> {
    config: OverlayConfig,
    axes: AxisRegistry<A>,
    annotations: IndexMap<AnnotationId, Annotation>,
}

impl<A: Axis> AnnotationLayer<A> {
    pub fn new(config: OverlayConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            axes: AxisRegistry::new(),
            annotations: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> OverlayConfig {
        self.config
    }

    #[must_use]
    pub fn axes(&self) -> &AxisRegistry<A> {
        &self.axes
    }

    pub fn add_axis(&mut self, axis: A) -> ChartResult<()> {
        debug!(axis = %axis.id(), "add axis");
        self.axes.insert(axis)
    }

    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&A> {
        self.axes.get(id)
    }

    /// Mutable axis access. Call [`Self::notify_axis_updated`] once the axis
    /// finished its update so bound annotations re-resolve.
    pub fn axis_mut(&mut self, id: AxisId) -> Option<&mut A> {
        self.axes.get_mut(id)
    }

    /// Re-resolves every annotation bound to `axis_id`. Returns how many
    /// annotations were affected.
    pub fn notify_axis_updated(
        &mut self,
        axis_id: AxisId,
        presenter: &mut dyn AnnotationPresenter,
    ) -> ChartResult<usize> {
        if !self.axes.contains(axis_id) {
            return Err(ChartError::UnknownAxis(axis_id));
        }

        let mut affected = 0;
        for annotation in self.annotations.values_mut() {
            if annotation.on_axis_updated(axis_id, &self.axes)? {
                presenter.refresh_node(annotation.id());
                affected += 1;
            }
        }
        debug!(axis = %axis_id, affected, "axis update propagated");
        Ok(affected)
    }

    /// Adds a point annotation styled from the config.
    pub fn add_point(
        &mut self,
        id: AnnotationId,
        first_axis: AxisId,
        second_axis: AxisId,
    ) -> ChartResult<&mut Annotation> {
        let annotation = Annotation::point(id)
            .with_axes(first_axis, second_axis)
            .with_style(self.config.point_style);
        self.insert_annotation(annotation)
    }

    /// Adds a band annotation styled from the config.
    pub fn add_band(&mut self, id: AnnotationId, axis: AxisId) -> ChartResult<&mut Annotation> {
        let annotation = Annotation::band(id)
            .with_axis(axis)
            .with_style(self.config.band_style);
        self.insert_annotation(annotation)
    }

    pub fn add_annotation(&mut self, annotation: Annotation) -> ChartResult<()> {
        self.insert_annotation(annotation).map(|_| ())
    }

    fn insert_annotation(&mut self, mut annotation: Annotation) -> ChartResult<&mut Annotation> {
        let id = annotation.id();
        if self.annotations.contains_key(&id) {
            return Err(ChartError::InvalidData(format!(
                "{id} is already registered"
            )));
        }
        annotation.update(&self.axes)?;
        debug!(annotation = %id, kind = ?annotation.kind(), "add annotation");
        let entry = self.annotations.entry(id).or_insert(annotation);
        Ok(entry)
    }

    #[must_use]
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.shift_remove(&id)
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.values()
    }

    #[must_use]
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn set_value(
        &mut self,
        id: AnnotationId,
        side: Side,
        value: impl Into<AxisValue>,
        presenter: &mut dyn AnnotationPresenter,
    ) -> ChartResult<()> {
        let annotation = self
            .annotations
            .get_mut(&id)
            .ok_or(ChartError::UnknownAnnotation(id))?;
        let applied = annotation.set_value(side, value, &self.axes);
        presenter.refresh_node(id);
        applied
    }

    pub fn set_axis(
        &mut self,
        id: AnnotationId,
        side: Side,
        axis: Option<AxisId>,
        presenter: &mut dyn AnnotationPresenter,
    ) -> ChartResult<()> {
        let annotation = self
            .annotations
            .get_mut(&id)
            .ok_or(ChartError::UnknownAnnotation(id))?;
        let applied = annotation.set_axis(side, axis, &self.axes);
        presenter.refresh_node(id);
        applied
    }

    pub fn set_content(
        &mut self,
        id: AnnotationId,
        content: Option<String>,
        presenter: &mut dyn AnnotationPresenter,
    ) -> ChartResult<()> {
        let annotation = self
            .annotations
            .get_mut(&id)
            .ok_or(ChartError::UnknownAnnotation(id))?;
        annotation.set_content(content)?;
        presenter.refresh_node(id);
        Ok(())
    }

    pub fn set_style(
        &mut self,
        id: AnnotationId,
        style: AnnotationStyle,
        presenter: &mut dyn AnnotationPresenter,
    ) -> ChartResult<()> {
        let annotation = self
            .annotations
            .get_mut(&id)
            .ok_or(ChartError::UnknownAnnotation(id))?;
        annotation.set_style(style)?;
        presenter.invalidate_palette();
        Ok(())
    }

    /// Invalidates every annotation ahead of a fresh layout pass.
    pub fn reset_state(&mut self) {
        for annotation in self.annotations.values_mut() {
            annotation.reset_state();
        }
        trace!(count = self.annotations.len(), "reset annotation state");
    }

    /// Resolves pending plot values. Returns the number of updated
    /// annotations. The first incompatible value aborts the pass.
    pub fn update_pass(&mut self) -> ChartResult<usize> {
        let mut updated = 0;
        for annotation in self.annotations.values_mut() {
            annotation.update(&self.axes)?;
            if annotation.is_updated() {
                updated += 1;
            }
        }
        trace!(updated, total = self.annotations.len(), "annotation update pass");
        Ok(updated)
    }

    /// Arranges every updated annotation against a fresh view snapshot.
    pub fn arrange_pass(
        &mut self,
        view: &dyn ChartView,
        presenter: &dyn AnnotationPresenter,
    ) -> ChartResult<LayerArrangement> {
        let transform = ViewTransform::capture(view).validate()?;
        let layout_rect = view.plot_area_clip();
        if !layout_rect.is_finite() {
            return Err(ChartError::InvalidData(
                "plot area clip must be finite".to_owned(),
            ));
        }

        let mut arrangement = LayerArrangement {
            collection_index: presenter.collection_index(),
            transform,
            ..LayerArrangement::default()
        };
        for annotation in self.annotations.values_mut() {
            if !annotation.is_updated() {
                debug!(annotation = %annotation.id(), "skipping annotation pending resolution");
                arrangement.skipped.push(annotation.id());
                continue;
            }
            let rect = annotation.arrange(layout_rect, &transform, presenter)?;
            arrangement.annotations.push(ArrangedAnnotation {
                id: annotation.id(),
                kind: annotation.kind(),
                rect,
                style: annotation.style(),
                z_index: annotation.z_index(),
            });
        }
        arrangement
            .annotations
            .sort_by_key(|arranged| arranged.z_index);

        debug!(
            arranged = arrangement.annotations.len(),
            skipped = arrangement.skipped.len(),
            "annotation arrange pass"
        );
        Ok(arrangement)
    }

    /// Update pass followed by arrange pass.
    pub fn layout_pass(
        &mut self,
        view: &dyn ChartView,
        presenter: &dyn AnnotationPresenter,
    ) -> ChartResult<LayerArrangement> {
        self.update_pass()?;
        self.arrange_pass(view, presenter)
    }

    /// Materializes arranged annotations and an optional tooltip pointer.
    ///
    /// The pointer path is translated into the container's coordinate space.
    #[must_use]
    pub fn build_frame(
        &self,
        arrangement: &LayerArrangement,
        pointer: Option<&PointerLayout>,
    ) -> RenderFrame {
        let mut frame = RenderFrame::new(self.config.viewport);
        for arranged in &arrangement.annotations {
            frame = frame.with_rect(RectPrimitive::new(
                arranged.rect,
                arranged.style.fill,
                arranged.style.stroke,
                arranged.style.stroke_width,
            ));
        }
        if let Some(path) = pointer.and_then(|layout| {
            layout
                .pointer_path()
                .map(|path| path.translated(layout.container_location()))
        }) {
            frame = frame.with_path(PathPrimitive::closed(
                path.points(),
                self.config.pointer_fill,
            ));
        }
        frame
    }

    /// Runs a layout pass and hands the resulting frame to `renderer`.
    pub fn render(
        &mut self,
        renderer: &mut dyn Renderer,
        view: &dyn ChartView,
        presenter: &dyn AnnotationPresenter,
        pointer: Option<&PointerLayout>,
    ) -> ChartResult<LayerArrangement> {
        let arrangement = self.layout_pass(view, presenter)?;
        let frame = self.build_frame(&arrangement, pointer);
        renderer.render(&frame)?;
        Ok(arrangement)
    }

    /// Pointer layout configured from this layer's pointer settings.
    pub fn pointer_layout(&self) -> ChartResult<PointerLayout> {
        PointerLayout::from_config(&self.config.pointer)
    }

    /// Places the tooltip box next to `target` inside the viewport, keeping
    /// the configured tooltip offset from it.
    pub fn place_tooltip(
        &self,
        pointer: &mut PointerLayout,
        target: Point,
    ) -> ChartResult<TooltipPlacement> {
        pointer.place_near(
            target,
            self.config.viewport.bounds(),
            self.config.tooltip_offset,
        )
    }

    /// Headless presenter measuring content with the configured text metrics.
    pub fn presenter(&self) -> ChartResult<GridTextPresenter> {
        GridTextPresenter::new(self.config.text_metrics)
    }
}
