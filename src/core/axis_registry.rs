use indexmap::IndexMap;

use crate::core::{Axis, AxisId, ChartAxis};
use crate::error::{ChartError, ChartResult};

/// Insertion-ordered axis table looked up by annotations during update passes.
#[derive(Debug, Clone)]
pub struct AxisRegistry<A: Axis = ChartAxis> {
    axes: IndexMap<AxisId, A>,
}

impl<A: Axis> Default for AxisRegistry<A> {
    fn default() -> Self {
        Self {
            axes: IndexMap::new(),
        }
    }
}

impl<A: Axis> AxisRegistry<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, axis: A) -> ChartResult<()> {
        let id = axis.id();
        if self.axes.contains_key(&id) {
            return Err(ChartError::InvalidData(format!(
                "{id} is already registered"
            )));
        }
        self.axes.insert(id, axis);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: AxisId) -> Option<&A> {
        self.axes.get(&id)
    }

    pub fn get_mut(&mut self, id: AxisId) -> Option<&mut A> {
        self.axes.get_mut(&id)
    }

    pub fn remove(&mut self, id: AxisId) -> Option<A> {
        self.axes.shift_remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: AxisId) -> bool {
        self.axes.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

impl<A: Axis> FromIterator<A> for AxisRegistry<A> {
    /// Later axes with a repeated id replace earlier ones.
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self {
            axes: iter.into_iter().map(|axis| (axis.id(), axis)).collect(),
        }
    }
}
