//! Reconciling selection nodes with changes to their source lists

use crate::domain::entities::selection_node::NodeId;
use crate::domain::ports::{ListMutation, PathResolver, SourceList};
use crate::domain::value_objects::InvalidationReport;
use crate::error::SelectionResult;

use super::{leaf_level_state, SelectionTree};

impl<S, R> SelectionTree<S, R>
where
    S: SourceList,
    R: PathResolver<S>,
{
    /// Bring node `id` in line with a change already made to its source.
    ///
    /// Selected ranges, child slots and the anchor are shifted so that they
    /// keep pointing at the same items. The report says whether selection
    /// state changed anywhere in the tree and lists the selected items that
    /// were removed. An anchor inside a removed block is unset, so
    /// [`anchor_index`](Self::anchor_index) can turn `None`. All bookkeeping
    /// is finished before this returns, so the caller may mutate the tree
    /// again right away.
    pub fn apply_mutation(
        &mut self,
        id: NodeId,
        mutation: ListMutation<S::Item>,
    ) -> SelectionResult<InvalidationReport<S::Item>> {
        let node = self.node(id)?;
        let previous_len =
            (node.len() + mutation.removed_count()).saturating_sub(mutation.added_count());
        let previous_count = node.selected_count();
        let kind = mutation.kind();

        let (mut invalidated, removed_items) = match mutation {
            ListMutation::Add { index, count } => (self.on_items_added(id, index, count)?, Vec::new()),
            ListMutation::Remove { index, old_items } => {
                self.on_items_removed(id, index, old_items)?
            }
            ListMutation::Replace {
                old_index,
                old_items,
                new_index,
                new_count,
            } => {
                let (removed_changed, removed) = self.on_items_removed(id, old_index, old_items)?;
                let added_changed = self.on_items_added(id, new_index, new_count)?;
                (removed_changed || added_changed, removed)
            }
            ListMutation::Reset => {
                self.clear(id)?;
                (true, Vec::new())
            }
        };

        if !invalidated {
            invalidated = self.position_state_moved(id, previous_count, previous_len)?;
        }
        if id == self.root && self.auto_select_root() {
            invalidated = true;
        }
        if invalidated {
            self.node_mut(id)?.invalidate_indices();
        }

        log::debug!(
            "applied {} to node {:?}: invalidated={}, removed={}",
            kind,
            id,
            invalidated,
            removed_items.len()
        );

        // Removing a selected item always deselects it, so removed items imply invalidation
        Ok(if invalidated {
            InvalidationReport::invalidated(removed_items)
        } else {
            InvalidationReport::unchanged()
        })
    }

    fn on_items_added(&mut self, id: NodeId, index: usize, count: usize) -> SelectionResult<bool> {
        Ok(self.node_mut(id)?.shift_for_insert(index, count))
    }

    fn on_items_removed(
        &mut self,
        id: NodeId,
        index: usize,
        old_items: Vec<S::Item>,
    ) -> SelectionResult<(bool, Vec<S::Item>)> {
        let node = self.node_mut(id)?;
        let count = old_items.len();
        let removed = node.selected_among(index, old_items);

        if node.is_empty() {
            self.clear(id)?;
            return Ok((true, removed));
        }

        let (changed, dropped) = node.shift_for_removal(index, count);
        self.discard(dropped);
        Ok((changed, removed))
    }

    /// Whether the state of `id`'s own position moved, when nothing changed locally.
    ///
    /// Nothing moving locally means the node had no child slots, so its state
    /// before the change follows from its counts. Ancestor positions can only
    /// move when this one does: a fully selected node that gains an
    /// unselected item turns partial, and a partial node that loses its last
    /// unselected item turns selected.
    fn position_state_moved(
        &self,
        id: NodeId,
        previous_count: usize,
        previous_len: usize,
    ) -> SelectionResult<bool> {
        if self.node(id)?.parent().is_none() {
            return Ok(false);
        }

        let before = leaf_level_state(previous_count, previous_len);
        let after = self.evaluate_children(id)?;
        if before != after {
            log::debug!("node {:?} went from {} to {}", id, before, after);
        }
        Ok(before != after)
    }
}
