use crate::core::Size;

/// Memoized content size of a point annotation. `None` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesiredSizeCache {
    size: Option<Size>,
}

impl DesiredSizeCache {
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.size.is_some()
    }

    #[must_use]
    pub fn cached(&self) -> Option<Size> {
        self.size
    }

    /// Returns the cached size, running `measure` only when unset.
    pub fn get_or_measure(&mut self, measure: impl FnOnce() -> Size) -> Size {
        *self.size.get_or_insert_with(measure)
    }

    pub fn invalidate(&mut self) {
        self.size = None;
    }
}
