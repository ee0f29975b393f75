use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{AnnotationId, Side};

/// Change notifications published by an annotation after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationEvent {
    ValueChanged { annotation: AnnotationId, side: Side },
    AxisChanged { annotation: AnnotationId, side: Side },
    Resolved { annotation: AnnotationId, side: Side },
    ContentChanged { annotation: AnnotationId },
    StyleChanged { annotation: AnnotationId },
    StateReset { annotation: AnnotationId },
}

impl AnnotationEvent {
    #[must_use]
    pub fn annotation(self) -> AnnotationId {
        match self {
            Self::ValueChanged { annotation, .. }
            | Self::AxisChanged { annotation, .. }
            | Self::Resolved { annotation, .. }
            | Self::ContentChanged { annotation }
            | Self::StyleChanged { annotation }
            | Self::StateReset { annotation } => annotation,
        }
    }
}

/// Typed listener attached to one annotation.
pub trait AnnotationObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: AnnotationEvent);
}

#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Box<dyn AnnotationObserver>>,
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|observer| observer.id()))
            .finish()
    }
}

impl ObserverList {
    /// Registers an observer with unique identifier.
    pub fn register(&mut self, observer: Box<dyn AnnotationObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.contains(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn contains(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn publish(&mut self, event: AnnotationEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}
