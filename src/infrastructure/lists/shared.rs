//! Shared List Implementation
//!
//! Implements the SourceList port for an in-memory list that can be shared
//! between the code that edits it and the selection tree that reads it.
//! Every edit returns the [`ListMutation`] describing it, ready to be passed to
//! [`SelectionTree::apply_mutation`](crate::SelectionTree::apply_mutation).

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use crate::domain::ports::{ListMutation, SourceList};

/// Reference-counted, single-threaded list
///
/// Clones share the same storage; two clones are the same source.
#[derive(Debug)]
pub struct SharedList<T> {
    items: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for SharedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
        }
    }
}

impl<T> FromIterator<T> for SharedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> SharedList<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Append one item
    pub fn push(&self, item: T) -> ListMutation<T> {
        let mut items = self.items.borrow_mut();
        let index = items.len();
        items.push(item);
        ListMutation::Add { index, count: 1 }
    }

    /// Insert one item at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&self, index: usize, item: T) -> ListMutation<T> {
        self.items.borrow_mut().insert(index, item);
        ListMutation::Add { index, count: 1 }
    }

    /// Insert several items starting at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_many(&self, index: usize, new_items: Vec<T>) -> ListMutation<T> {
        let count = new_items.len();
        self.items.borrow_mut().splice(index..index, new_items);
        ListMutation::Add { index, count }
    }

    /// Remove the item at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&self, index: usize) -> ListMutation<T> {
        let item = self.items.borrow_mut().remove(index);
        ListMutation::Remove {
            index,
            old_items: vec![item],
        }
    }

    /// Remove every item in `range`
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&self, range: Range<usize>) -> ListMutation<T> {
        let index = range.start;
        let old_items: Vec<T> = self.items.borrow_mut().drain(range).collect();
        ListMutation::Remove { index, old_items }
    }

    /// Replace the item at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&self, index: usize, item: T) -> ListMutation<T> {
        let old = std::mem::replace(&mut self.items.borrow_mut()[index], item);
        ListMutation::Replace {
            old_index: index,
            old_items: vec![old],
            new_index: index,
            new_count: 1,
        }
    }

    /// Swap in entirely new contents
    pub fn reset(&self, items: Vec<T>) -> ListMutation<T> {
        *self.items.borrow_mut() = items;
        ListMutation::Reset
    }
}

impl<T: Clone> SharedList<T> {
    /// Copy of the current contents
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T: Clone> SourceList for SharedList<T> {
    type Item = T;

    fn len(&self) -> usize {
        SharedList::len(self)
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().as_slice().get(index).cloned()
    }

    fn same_source(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}
