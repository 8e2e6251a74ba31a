//! InvalidationReport value object - outcome of applying a list mutation

/// What the owner of a selection tree needs to know after a list mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationReport<T> {
    /// Selection state changed somewhere in the tree
    pub selection_invalidated: bool,
    /// Items that were selected when they were removed from their list
    pub removed_items: Vec<T>,
}

impl<T> InvalidationReport<T> {
    /// Nothing observable changed
    pub fn unchanged() -> Self {
        Self {
            selection_invalidated: false,
            removed_items: Vec::new(),
        }
    }

    pub fn invalidated(removed_items: Vec<T>) -> Self {
        Self {
            selection_invalidated: true,
            removed_items,
        }
    }

    /// Whether the owner has to refresh anything
    pub fn is_empty(&self) -> bool {
        !self.selection_invalidated && self.removed_items.is_empty()
    }
}

impl<T> Default for InvalidationReport<T> {
    fn default() -> Self {
        Self::unchanged()
    }
}
