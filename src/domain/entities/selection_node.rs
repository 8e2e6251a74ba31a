//! SelectionNode entity
//!
//! Selection state for one level of a nested collection. A node stores the
//! selected positions of its own list as a list of closed ranges, plus one
//! child slot per list item once any child has been realized.
//!
//! Nodes live inside a [`SelectionTree`](super::SelectionTree) arena. Everything
//! that needs to see more than one node (realization, tri-state evaluation,
//! discarding subtrees) is implemented there; this module only keeps the
//! per-level bookkeeping consistent.

use std::cell::OnceCell;

use slotmap::new_key_type;

use crate::domain::ports::SourceList;
use crate::domain::value_objects::IndexRange;

new_key_type! {
    /// Handle to a node stored in a [`SelectionTree`](super::SelectionTree).
    ///
    /// Handles become stale once their node is discarded.
    pub struct NodeId;
}

/// One child position of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChildSlot {
    /// Not looked at yet
    #[default]
    Unrealized,
    /// The item has no nested collection; its selection lives on the parent
    Leaf,
    /// The item has a nested collection tracked by its own node
    Node(NodeId),
}

impl ChildSlot {
    pub fn is_realized(&self) -> bool {
        !matches!(self, ChildSlot::Unrealized)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ChildSlot::Leaf)
    }

    /// The nested node, if this slot holds one
    pub fn node(&self) -> Option<NodeId> {
        match self {
            ChildSlot::Node(id) => Some(*id),
            ChildSlot::Unrealized | ChildSlot::Leaf => None,
        }
    }
}

/// Selection state of one collection level
#[derive(Debug)]
pub struct SelectionNode<S> {
    source: Option<S>,
    /// Not sorted, not merged; ranges may overlap
    selected: Vec<IndexRange>,
    selected_count: usize,
    /// Empty, or exactly one slot per source item
    children: Vec<ChildSlot>,
    realized_children: usize,
    anchor: Option<usize>,
    parent: Option<NodeId>,
    indices_cache: OnceCell<Vec<usize>>,
}

impl<S> SelectionNode<S> {
    pub(crate) fn new(parent: Option<NodeId>, source: Option<S>) -> Self {
        Self {
            source,
            selected: Vec::new(),
            selected_count: 0,
            children: Vec::new(),
            realized_children: 0,
            anchor: None,
            parent,
            indices_cache: OnceCell::new(),
        }
    }

    /// The bound collection, if any
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Containing node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.iter().any(|range| range.contains(index))
    }

    /// Number of distinct selected positions at this level
    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    /// Stored ranges, in insertion order
    pub fn selected_ranges(&self) -> &[IndexRange] {
        &self.selected
    }

    /// Selected positions, ascending and without duplicates
    pub fn selected_indices(&self) -> &[usize] {
        self.indices_cache.get_or_init(|| {
            let mut indices: Vec<usize> = self
                .selected
                .iter()
                .flat_map(|range| range.indices())
                .collect();
            indices.sort_unstable();
            indices.dedup();
            indices
        })
    }

    /// Lowest selected position
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_indices().first().copied()
    }

    /// Pivot for range gestures
    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor
    }

    /// Zero until a child has been realized, then the list length
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn realized_children_count(&self) -> usize {
        self.realized_children
    }

    /// Peek at a child slot without realizing anything.
    ///
    /// Returns `None` when no child has been realized yet or `index` is out of range.
    pub fn child(&self, index: usize) -> Option<ChildSlot> {
        // `SourceList` is implemented for `Vec`, so index through the slice
        self.children.as_slice().get(index).copied()
    }

    /// Position of `child` among this node's slots
    pub(crate) fn position_of(&self, child: NodeId) -> Option<usize> {
        self.children
            .iter()
            .position(|slot| *slot == ChildSlot::Node(child))
    }

    pub(crate) fn set_anchor_index(&mut self, anchor: Option<usize>) {
        self.anchor = anchor;
    }

    pub(crate) fn set_source(&mut self, source: Option<S>) {
        self.source = source;
        self.invalidate_indices();
    }

    pub(crate) fn invalidate_indices(&mut self) {
        self.indices_cache.take();
    }

    /// Drop every range and every child slot.
    ///
    /// Returns the discarded slots so the tree can release nested nodes.
    pub(crate) fn reset_selection(&mut self) -> Vec<ChildSlot> {
        self.selected.clear();
        self.selected_count = 0;
        self.anchor = None;
        self.realized_children = 0;
        self.invalidate_indices();
        std::mem::take(&mut self.children)
    }

    /// Add a range; returns whether any position became selected.
    pub(crate) fn add_range(&mut self, range: IndexRange) -> bool {
        let newly_selected = range.indices().filter(|&i| !self.is_selected(i)).count();
        if newly_selected == 0 {
            return false;
        }

        log::trace!("select {} (+{})", range, newly_selected);
        self.selected.push(range);
        self.selected_count += newly_selected;
        self.invalidate_indices();
        true
    }

    /// Remove a range; returns whether any position became unselected.
    pub(crate) fn remove_range(&mut self, removed: IndexRange) -> bool {
        let deselected = removed.indices().filter(|&i| self.is_selected(i)).count();
        if deselected == 0 {
            return false;
        }

        log::trace!("deselect {} (-{})", removed, deselected);
        self.selected_count -= deselected;

        let mut kept = Vec::with_capacity(self.selected.len() + 1);
        for range in self.selected.drain(..) {
            if !removed.intersects(&range) {
                kept.push(range);
                continue;
            }

            // Left of the removed block stays
            if range.begin() < removed.begin() {
                if let (Some(before), _) = range.split(removed.begin() - 1) {
                    kept.push(before);
                }
            }

            // Right of the removed block stays
            if let (_, Some(after)) = range.split(removed.end()) {
                kept.push(after);
            }
        }
        self.selected = kept;
        self.invalidate_indices();
        true
    }
}

impl<S: SourceList> SelectionNode<S> {
    /// Number of items in the bound source (0 when unbound)
    pub fn len(&self) -> usize {
        self.source.as_ref().map_or(0, |source| source.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Item at `index` in the bound source
    pub(crate) fn item(&self, index: usize) -> Option<S::Item> {
        self.source.as_ref().and_then(|source| source.get(index))
    }

    /// Select or deselect one position.
    ///
    /// Returns `false` only for an invalid index.
    pub(crate) fn select(&mut self, index: usize, select: bool) -> bool {
        if !self.is_valid_index(index) {
            return false;
        }

        if self.is_selected(index) != select {
            let range = IndexRange::single(index);
            if select {
                self.add_range(range);
            } else {
                self.remove_range(range);
            }
        }
        true
    }

    /// Select or deselect a whole range; both ends must be valid.
    pub(crate) fn select_range(&mut self, range: IndexRange, select: bool) -> bool {
        if !self.is_valid_index(range.begin()) || !self.is_valid_index(range.end()) {
            return false;
        }

        if select {
            self.add_range(range);
        } else {
            self.remove_range(range);
        }
        true
    }

    pub(crate) fn select_all(&mut self) {
        let len = self.len();
        if len > 0 {
            self.add_range(IndexRange::new(0, len - 1));
        }
    }

    /// Size the child slots to the source on first realization
    pub(crate) fn ensure_children(&mut self) {
        if self.children.is_empty() {
            self.children = vec![ChildSlot::Unrealized; self.len()];
        }
    }

    /// Fill an unrealized slot
    pub(crate) fn realize(&mut self, index: usize, slot: ChildSlot) {
        if let Some(existing) = self.children.get_mut(index) {
            if !existing.is_realized() && slot.is_realized() {
                self.realized_children += 1;
            }
            *existing = slot;
        }
    }

    /// Items from a removed block whose positions were selected
    pub(crate) fn selected_among<T>(&self, index: usize, old_items: Vec<T>) -> Vec<T> {
        old_items
            .into_iter()
            .enumerate()
            .filter(|(offset, _)| self.is_selected(index + offset))
            .map(|(_, item)| item)
            .collect()
    }

    /// Move stored state right after `count` items were inserted at `index`.
    ///
    /// Returns whether anything observable at this level moved.
    pub(crate) fn shift_for_insert(&mut self, index: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }

        let mut changed = false;
        let mut split_off = Vec::new();
        for range in self.selected.iter_mut() {
            if range.end() < index {
                continue;
            }

            // A range straddling the insertion point keeps its left part in place
            if index > 0 && range.contains(index - 1) {
                if let (Some(before), Some(after)) = range.split(index - 1) {
                    split_off.push(before);
                    *range = after;
                }
            }

            *range = range.shifted_right(count);
            changed = true;
        }
        self.selected.extend(split_off);

        if !self.children.is_empty() {
            let at = index.min(self.children.len());
            self.children
                .splice(at..at, std::iter::repeat(ChildSlot::Unrealized).take(count));
            changed = true;
        }

        if let Some(anchor) = self.anchor {
            if anchor >= index {
                self.anchor = Some(anchor + count);
            }
        }

        if changed {
            self.invalidate_indices();
        }
        changed
    }

    /// Drop and shift stored state after `count` items were removed at `index`.
    ///
    /// Returns whether anything observable at this level moved, plus the
    /// child slots that were cut out.
    pub(crate) fn shift_for_removal(&mut self, index: usize, count: usize) -> (bool, Vec<ChildSlot>) {
        if count == 0 {
            return (false, Vec::new());
        }

        let mut changed = self.remove_range(IndexRange::new(index, index + count - 1));

        // Nothing selected overlaps the removed block any more
        for range in self.selected.iter_mut() {
            if range.end() > index {
                *range = range.shifted_left(count);
                changed = true;
            }
        }

        let mut dropped = Vec::new();
        if !self.children.is_empty() {
            let len = self.children.len();
            let start = index.min(len);
            let end = (index + count).min(len);
            dropped.extend(self.children.drain(start..end));
            self.realized_children -= dropped.iter().filter(|slot| slot.is_realized()).count();
            changed = true;
        }

        if let Some(anchor) = self.anchor {
            if anchor >= index + count {
                self.anchor = Some(anchor - count);
            } else if anchor >= index {
                self.anchor = None;
            }
        }

        if changed {
            self.invalidate_indices();
        }
        (changed, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(len: usize) -> SelectionNode<Vec<usize>> {
        SelectionNode::new(None, Some((0..len).collect()))
    }

    fn distinct_selected(node: &SelectionNode<Vec<usize>>) -> usize {
        (0..node.len()).filter(|&i| node.is_selected(i)).count()
    }

    #[test]
    fn select_single_index() {
        let mut node = node(5);
        assert!(node.select(1, true));
        assert!(node.select(3, true));
        assert_eq!(node.selected_indices(), &[1, 3]);
        assert_eq!(node.selected_count(), 2);
    }

    #[test]
    fn select_invalid_index_reports_false() {
        let mut node = node(3);
        assert!(!node.select(3, true));
        assert_eq!(node.selected_count(), 0);
    }

    #[test]
    fn select_duplicate_is_noop_success() {
        let mut node = node(3);
        assert!(node.select(1, true));
        assert!(node.select(1, true));
        assert_eq!(node.selected_ranges().len(), 1);
        assert!(node.select(2, false));
        assert_eq!(node.selected_count(), 1);
    }

    #[test]
    fn unbound_node_has_no_valid_indices() {
        let mut node: SelectionNode<Vec<usize>> = SelectionNode::new(None, None);
        assert!(!node.select(0, true));
        assert!(!node.select_range(IndexRange::new(0, 0), true));
    }

    #[test]
    fn overlapping_ranges_count_once() {
        let mut node = node(10);
        assert!(node.select_range(IndexRange::new(2, 5), true));
        assert!(node.select_range(IndexRange::new(4, 7), true));
        assert!(node.select_range(IndexRange::new(3, 4), true));
        assert_eq!(node.selected_count(), 6);
        assert_eq!(node.selected_indices(), &[2, 3, 4, 5, 6, 7]);
        // Fully covered range adds nothing
        assert_eq!(node.selected_ranges().len(), 2);
    }

    #[test]
    fn select_range_rejects_out_of_bounds() {
        let mut node = node(4);
        assert!(!node.select_range(IndexRange::new(2, 4), true));
        assert_eq!(node.selected_count(), 0);
    }

    #[test]
    fn remove_range_clips_both_sides() {
        let mut node = node(10);
        node.select_range(IndexRange::new(1, 8), true);
        node.select_range(IndexRange::new(3, 5), false);
        assert_eq!(node.selected_indices(), &[1, 2, 6, 7, 8]);
        assert_eq!(node.selected_count(), 5);
        assert_eq!(distinct_selected(&node), 5);
    }

    #[test]
    fn remove_range_across_overlapping_ranges() {
        let mut node = node(10);
        node.select_range(IndexRange::new(0, 4), true);
        node.select_range(IndexRange::new(3, 8), true);
        node.select_range(IndexRange::new(2, 6), false);
        assert_eq!(node.selected_indices(), &[0, 1, 7, 8]);
        assert_eq!(node.selected_count(), distinct_selected(&node));
    }

    #[test]
    fn remove_at_zero_keeps_right_side() {
        let mut node = node(5);
        node.select_range(IndexRange::new(0, 4), true);
        node.select_range(IndexRange::new(0, 1), false);
        assert_eq!(node.selected_indices(), &[2, 3, 4]);
    }

    #[test]
    fn select_all_then_reset() {
        let mut node = node(6);
        node.select_all();
        assert_eq!(node.selected_count(), 6);
        node.set_anchor_index(Some(2));

        let dropped = node.reset_selection();
        assert!(dropped.is_empty());
        assert_eq!(node.selected_count(), 0);
        assert!(node.selected_ranges().is_empty());
        assert!(node.selected_indices().is_empty());
        assert_eq!(node.anchor_index(), None);
    }

    #[test]
    fn cache_refreshes_after_mutation() {
        let mut node = node(5);
        node.select(4, true);
        assert_eq!(node.selected_indices(), &[4]);
        node.select(0, true);
        assert_eq!(node.selected_indices(), &[0, 4]);
        assert_eq!(node.selected_index(), Some(0));
    }

    #[test]
    fn insert_shifts_ranges_at_or_after_index() {
        let mut node = node(12);
        node.select_range(IndexRange::new(2, 4), true);
        // Source grew by two at index 3
        assert!(node.shift_for_insert(3, 2));
        assert_eq!(node.selected_indices(), &[2, 5, 6]);
        assert_eq!(node.selected_count(), 3);
    }

    #[test]
    fn insert_inside_range_splits_it() {
        let mut node = node(12);
        node.select_range(IndexRange::new(2, 6), true);
        assert!(node.shift_for_insert(4, 3));
        assert_eq!(node.selected_indices(), &[2, 3, 7, 8, 9]);
        assert_eq!(node.selected_count(), 5);
        assert!(!node.is_selected(4));
    }

    #[test]
    fn child_peeks_slots_by_position() {
        let mut node = node(3);
        assert_eq!(node.child(0), None);

        node.ensure_children();
        node.realize(2, ChildSlot::Leaf);
        assert_eq!(node.child(0), Some(ChildSlot::Unrealized));
        assert_eq!(node.child(2), Some(ChildSlot::Leaf));
        assert_eq!(node.child(3), None);
    }

    #[test]
    fn insert_before_everything_shifts_whole_range() {
        let mut node = node(8);
        node.select_range(IndexRange::new(0, 1), true);
        assert!(node.shift_for_insert(0, 3));
        assert_eq!(node.selected_indices(), &[3, 4]);
    }

    #[test]
    fn insert_after_selection_changes_nothing() {
        let mut node = node(8);
        node.select_range(IndexRange::new(0, 1), true);
        assert!(!node.shift_for_insert(5, 3));
        assert_eq!(node.selected_indices(), &[0, 1]);
    }

    #[test]
    fn insert_adds_unrealized_slots_and_moves_anchor() {
        let mut node = node(4);
        node.ensure_children();
        node.realize(1, ChildSlot::Leaf);
        node.set_anchor_index(Some(2));

        assert!(node.shift_for_insert(1, 2));
        assert_eq!(node.children_count(), 6);
        assert_eq!(node.child(1), Some(ChildSlot::Unrealized));
        assert_eq!(node.child(3), Some(ChildSlot::Leaf));
        assert_eq!(node.realized_children_count(), 1);
        assert_eq!(node.anchor_index(), Some(4));
    }

    #[test]
    fn removal_clips_and_shifts() {
        let mut node = node(8);
        node.select_range(IndexRange::new(2, 5), true);
        let (changed, dropped) = node.shift_for_removal(3, 2);
        assert!(changed);
        assert!(dropped.is_empty());
        assert_eq!(node.selected_indices(), &[2, 3]);
        assert_eq!(node.selected_count(), 2);
    }

    #[test]
    fn removal_before_selection_only_shifts() {
        let mut node = node(4);
        node.select(1, true);
        node.select(3, true);
        let (changed, _) = node.shift_for_removal(0, 1);
        assert!(changed);
        assert_eq!(node.selected_indices(), &[0, 2]);
    }

    #[test]
    fn removal_of_unselected_tail_changes_nothing() {
        let mut node = node(4);
        node.select(0, true);
        let (changed, _) = node.shift_for_removal(2, 2);
        assert!(!changed);
        assert_eq!(node.selected_indices(), &[0]);
    }

    #[test]
    fn removal_drops_slots_and_fixes_realized_count() {
        let mut node = node(5);
        node.ensure_children();
        node.realize(0, ChildSlot::Leaf);
        node.realize(2, ChildSlot::Leaf);
        node.realize(3, ChildSlot::Leaf);

        let (changed, dropped) = node.shift_for_removal(1, 2);
        assert!(changed);
        assert_eq!(dropped, vec![ChildSlot::Unrealized, ChildSlot::Leaf]);
        assert_eq!(node.children_count(), 3);
        assert_eq!(node.realized_children_count(), 2);
    }

    #[test]
    fn removal_moves_or_unsets_anchor() {
        let mut node = node(10);
        node.set_anchor_index(Some(6));
        node.shift_for_removal(2, 2);
        assert_eq!(node.anchor_index(), Some(4));

        node.shift_for_removal(3, 3);
        assert_eq!(node.anchor_index(), None);
    }

    #[test]
    fn selected_among_keeps_selected_items_only() {
        let mut node = node(6);
        node.select(2, true);
        node.select(4, true);
        let removed = node.selected_among(2, vec!["c", "d", "e"]);
        assert_eq!(removed, vec!["c", "e"]);
    }

    #[test]
    fn realize_counts_first_time_only() {
        let mut node = node(3);
        node.ensure_children();
        node.realize(1, ChildSlot::Leaf);
        node.realize(1, ChildSlot::Leaf);
        assert_eq!(node.realized_children_count(), 1);
        assert!(node.child(0).is_some_and(|slot| !slot.is_realized()));
    }
}
