//! Path Resolver Port
//!
//! Decides, while a child slot is being realized, whether the item at that
//! position has a nested collection of its own.

use crate::domain::value_objects::IndexPath;

use super::SourceList;

/// Trait for resolving nested collections during realization.
///
/// Implementations can be:
/// - `LeafResolver`: flat lists, every item is a leaf
/// - any closure `Fn(&S::Item, &IndexPath) -> Option<S>`
pub trait PathResolver<S: SourceList> {
    /// Return the nested source for `item`, or `None` when it is a leaf.
    ///
    /// `containing` is the path of the node that holds `item`.
    fn resolve(&self, item: &S::Item, containing: &IndexPath) -> Option<S>;
}

impl<S, F> PathResolver<S> for F
where
    S: SourceList,
    F: Fn(&S::Item, &IndexPath) -> Option<S>,
{
    fn resolve(&self, item: &S::Item, containing: &IndexPath) -> Option<S> {
        self(item, containing)
    }
}

/// Resolver for flat lists: nothing ever nests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafResolver;

impl<S: SourceList> PathResolver<S> for LeafResolver {
    fn resolve(&self, _item: &S::Item, _containing: &IndexPath) -> Option<S> {
        None
    }
}
