//! Source List Port
//!
//! The collection a selection node is bound to. The tree only reads from it;
//! changes made elsewhere are delivered as [`ListMutation`] events through
//! [`SelectionTree::apply_mutation`](crate::SelectionTree::apply_mutation).

/// Read-only view over one level of the selectable collection.
pub trait SourceList {
    /// Data item stored at each position
    type Item;

    /// Current number of items
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`, or `None` when out of range or absent
    fn get(&self, index: usize) -> Option<Self::Item>;

    /// Whether `other` refers to the same underlying collection.
    ///
    /// Rebinding a node to the same source is a no-op.
    fn same_source(&self, other: &Self) -> bool;
}

impl<T: Clone + PartialEq> SourceList for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }

    fn same_source(&self, other: &Self) -> bool {
        self == other
    }
}

/// Structured change to a source list.
///
/// Events describe a mutation that has already happened: `len()` on the
/// source reports the new size when the event is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMutation<T> {
    /// `count` items were inserted starting at `index`
    Add { index: usize, count: usize },

    /// `old_items` were removed starting at `index`
    Remove { index: usize, old_items: Vec<T> },

    /// `old_items` at `old_index` were replaced by `new_count` items at `new_index`
    Replace {
        old_index: usize,
        old_items: Vec<T>,
        new_index: usize,
        new_count: usize,
    },

    /// The list changed in a way that cannot be described incrementally
    Reset,
}

impl<T> ListMutation<T> {
    /// Number of positions removed by this event
    pub fn removed_count(&self) -> usize {
        match self {
            ListMutation::Remove { old_items, .. } | ListMutation::Replace { old_items, .. } => {
                old_items.len()
            }
            ListMutation::Add { .. } | ListMutation::Reset => 0,
        }
    }

    /// Number of positions inserted by this event
    pub fn added_count(&self) -> usize {
        match self {
            ListMutation::Add { count, .. } => *count,
            ListMutation::Replace { new_count, .. } => *new_count,
            ListMutation::Remove { .. } | ListMutation::Reset => 0,
        }
    }

    /// Short name used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            ListMutation::Add { .. } => "add",
            ListMutation::Remove { .. } => "remove",
            ListMutation::Replace { .. } => "replace",
            ListMutation::Reset => "reset",
        }
    }
}
