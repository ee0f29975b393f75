use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::Size;
use crate::error::{ChartError, ChartResult};

use super::AnnotationId;

/// Presenting surface an annotation layer draws into.
pub trait AnnotationPresenter {
    /// Measures `content` for `owner`. Called at most once per content change.
    fn measure_content(&self, owner: AnnotationId, content: Option<&str>) -> Size;
    fn refresh_node(&mut self, node: AnnotationId);
    fn invalidate_palette(&mut self);
    fn collection_index(&self) -> usize;
}

/// Tuning for character-grid text measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub char_width_px: f64,
    pub line_height_px: f64,
    pub padding_px: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            line_height_px: 14.0,
            padding_px: 4.0,
        }
    }
}

impl TextMetrics {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.char_width_px, "char_width_px"),
            (self.line_height_px, "line_height_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "text metric `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "text metric `padding_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Headless presenter that sizes content on a fixed character grid and
/// records refresh requests for the host to drain.
#[derive(Debug, Clone, Default)]
pub struct GridTextPresenter {
    metrics: TextMetrics,
    collection_index: usize,
    dirty_nodes: HashSet<AnnotationId>,
    palette_invalidations: usize,
}

impl GridTextPresenter {
    pub fn new(metrics: TextMetrics) -> ChartResult<Self> {
        Ok(Self {
            metrics: metrics.validate()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_collection_index(mut self, collection_index: usize) -> Self {
        self.collection_index = collection_index;
        self
    }

    #[must_use]
    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    #[must_use]
    pub fn is_dirty(&self, node: AnnotationId) -> bool {
        self.dirty_nodes.contains(&node)
    }

    #[must_use]
    pub fn palette_invalidations(&self) -> usize {
        self.palette_invalidations
    }

    /// Returns and clears the nodes refreshed since the last drain, sorted.
    pub fn drain_dirty(&mut self) -> Vec<AnnotationId> {
        let mut nodes: Vec<_> = self.dirty_nodes.drain().collect();
        nodes.sort_unstable();
        nodes
    }
}

impl AnnotationPresenter for GridTextPresenter {
    fn measure_content(&self, _owner: AnnotationId, content: Option<&str>) -> Size {
        let Some(text) = content.filter(|text| !text.is_empty()) else {
            return Size::default();
        };
        let lines = text.lines().count().max(1);
        let widest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let padding = 2.0 * self.metrics.padding_px;
        Size::new(
            widest as f64 * self.metrics.char_width_px + padding,
            lines as f64 * self.metrics.line_height_px + padding,
        )
    }

    fn refresh_node(&mut self, node: AnnotationId) {
        self.dirty_nodes.insert(node);
    }

    fn invalidate_palette(&mut self) {
        self.palette_invalidations += 1;
    }

    fn collection_index(&self) -> usize {
        self.collection_index
    }
}
