//! SelectionTree entity
//!
//! Owns every [`SelectionNode`] of a nested selection in a slot map and is the
//! only way to mutate them. Child nodes are created lazily the first time a
//! position is realized, and a position with no nested collection is marked
//! with [`ChildSlot::Leaf`] instead of getting a node of its own.
//!
//! ## Tri-state evaluation
//!
//! The state of a position is derived on demand, never stored:
//!
//! - a leaf or unrealized position is selected iff its parent's ranges cover it
//! - a position holding a node is evaluated from that node's own ranges and its
//!   realized children, without realizing anything new
//!
//! ## Lifetime
//!
//! A node's parent link is a plain [`NodeId`]. Subtrees are discarded top-down
//! whenever their slot disappears (clear, source rebinding, item removal), after
//! which the handles of every node in them are stale.

use slotmap::SlotMap;

use crate::config::SelectionConfig;
use crate::domain::ports::{PathResolver, SourceList};
use crate::domain::value_objects::{IndexPath, IndexRange, SelectionState};
use crate::error::{SelectionError, SelectionResult};

use super::selection_node::{ChildSlot, NodeId, SelectionNode};

mod mutation;

/// Arena of selection nodes rooted at a single node
#[derive(Debug)]
pub struct SelectionTree<S, R> {
    nodes: SlotMap<NodeId, SelectionNode<S>>,
    root: NodeId,
    resolver: R,
    config: SelectionConfig,
}

impl<S, R> SelectionTree<S, R>
where
    S: SourceList,
    R: PathResolver<S>,
{
    /// Create a tree with an unbound root
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, SelectionConfig::default())
    }

    pub fn with_config(resolver: R, config: SelectionConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SelectionNode::new(None, None));
        Self {
            nodes,
            root,
            resolver,
            config,
        }
    }

    /// Create a tree whose root is bound to `source`
    pub fn with_source(source: S, resolver: R, config: SelectionConfig) -> Self {
        let mut tree = Self::with_config(resolver, config);
        tree.bind(tree.root, Some(source));
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Number of live nodes, the root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> SelectionResult<&SelectionNode<S>> {
        self.nodes.get(id).ok_or(SelectionError::StaleNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> SelectionResult<&mut SelectionNode<S>> {
        self.nodes.get_mut(id).ok_or(SelectionError::StaleNode(id))
    }

    // ------------------------------------------------------------------
    // Source binding and realization
    // ------------------------------------------------------------------

    /// Bind `id` to a new source, or unbind it with `None`.
    ///
    /// The node's selection and all of its realized children are dropped.
    /// Binding the source the node already has is a no-op.
    pub fn set_source(&mut self, id: NodeId, source: Option<S>) -> SelectionResult<()> {
        let unchanged = match (self.node(id)?.source(), &source) {
            (Some(current), Some(next)) => current.same_source(next),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.bind(id, source);
        }
        Ok(())
    }

    fn bind(&mut self, id: NodeId, source: Option<S>) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let dropped = node.reset_selection();
        node.set_source(source);
        let len = node.len();
        self.discard(dropped);
        log::debug!("bound node {:?} to a source of {} items", id, len);

        if id == self.root {
            self.auto_select_root();
        }
    }

    /// Look up the child slot at `index`, realizing it when `realize` is set.
    ///
    /// Without `realize` this is a pure peek that returns `None` until the
    /// node has realized any child. Out-of-range indices give `None`.
    pub fn get_at(
        &mut self,
        id: NodeId,
        index: usize,
        realize: bool,
    ) -> SelectionResult<Option<ChildSlot>> {
        if realize {
            self.realize_child(id, index)
        } else {
            Ok(self.node(id)?.child(index))
        }
    }

    /// Realize the child slot at `index`, asking the resolver for a nested
    /// source the first time.
    pub fn realize_child(&mut self, id: NodeId, index: usize) -> SelectionResult<Option<ChildSlot>> {
        let node = self.node_mut(id)?;
        if !node.is_valid_index(index) {
            return Ok(None);
        }

        node.ensure_children();
        match node.child(index) {
            Some(ChildSlot::Unrealized) => {}
            existing => return Ok(existing),
        }

        // An absent item is treated as a leaf
        let nested = match node.item(index) {
            Some(item) => {
                let path = self.index_path(id)?;
                self.resolver.resolve(&item, &path)
            }
            None => None,
        };

        let slot = match nested {
            Some(source) => {
                let child = self.nodes.insert(SelectionNode::new(Some(id), Some(source)));
                log::debug!("realized node {:?} at {} under {:?}", child, index, id);
                ChildSlot::Node(child)
            }
            None => ChildSlot::Leaf,
        };
        self.node_mut(id)?.realize(index, slot);
        Ok(Some(slot))
    }

    /// Release the nodes held by `slots` and everything below them
    fn discard(&mut self, slots: impl IntoIterator<Item = ChildSlot>) {
        let mut pending: Vec<NodeId> = slots.into_iter().filter_map(|slot| slot.node()).collect();
        while let Some(id) = pending.pop() {
            if let Some(mut node) = self.nodes.remove(id) {
                log::trace!("discarded node {:?}", id);
                pending.extend(node.reset_selection().into_iter().filter_map(|slot| slot.node()));
            }
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Positions leading from the root to `id`
    pub fn index_path(&self, id: NodeId) -> SelectionResult<IndexPath> {
        let mut indices = Vec::new();
        let mut current = id;
        let mut parent = self.node(id)?.parent();

        while let Some(parent_id) = parent {
            let parent_node = self.node(parent_id)?;
            let position = parent_node
                .position_of(current)
                .ok_or(SelectionError::StaleNode(current))?;
            indices.push(position);
            current = parent_id;
            parent = parent_node.parent();
        }

        indices.reverse();
        Ok(IndexPath::new(indices))
    }

    /// Walk down from the root along `path`.
    ///
    /// Returns `None` when a position on the way is out of range, a leaf, or
    /// unrealized while `realize` is off.
    pub fn node_at_path(&mut self, path: &IndexPath, realize: bool) -> SelectionResult<Option<NodeId>> {
        let mut current = self.root;
        for &index in path.indices() {
            match self.get_at(current, index, realize)? {
                Some(ChildSlot::Node(child)) => current = child,
                _ => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_selected(&self, id: NodeId, index: usize) -> SelectionResult<bool> {
        Ok(self.node(id)?.is_selected(index))
    }

    /// Selected positions of `id`, ascending
    pub fn selected_indices(&self, id: NodeId) -> SelectionResult<&[usize]> {
        Ok(self.node(id)?.selected_indices())
    }

    /// Tri-state of `id`'s own position inside its parent.
    ///
    /// The root has no position and reports `NotSelected`.
    pub fn selection_state(&self, id: NodeId) -> SelectionResult<SelectionState> {
        let Some(parent) = self.node(id)?.parent() else {
            return Ok(SelectionState::NotSelected);
        };
        match self.node(parent)?.position_of(id) {
            Some(position) => self.selection_state_at(parent, position),
            None => Ok(SelectionState::NotSelected),
        }
    }

    /// Tri-state of position `index` of node `id`
    pub fn selection_state_at(&self, id: NodeId, index: usize) -> SelectionResult<SelectionState> {
        let node = self.node(id)?;
        match node.child(index) {
            Some(ChildSlot::Node(child)) => self.evaluate_children(child),
            _ => Ok(SelectionState::from_selected(node.is_selected(index))),
        }
    }

    /// Nullable form of [`selection_state`](Self::selection_state):
    /// `Some(true)` selected, `Some(false)` not selected, `None` partial.
    pub fn is_selected_with_partial(&self, id: NodeId) -> SelectionResult<Option<bool>> {
        Ok(self.selection_state(id)?.as_nullable())
    }

    /// Nullable form of [`selection_state_at`](Self::selection_state_at)
    pub fn is_selected_with_partial_at(&self, id: NodeId, index: usize) -> SelectionResult<Option<bool>> {
        Ok(self.selection_state_at(id, index)?.as_nullable())
    }

    /// Evaluate the tri-state of node `id` from its ranges and realized children.
    ///
    /// Never realizes anything: unrealized positions are judged by this
    /// node's own ranges.
    pub fn evaluate_children(&self, id: NodeId) -> SelectionResult<SelectionState> {
        let node = self.node(id)?;
        let realized = node.realized_children_count();
        let selected = node.selected_count();
        let data_count = node.len();

        if realized == 0 {
            return Ok(leaf_level_state(selected, data_count));
        }

        let mut selected_seen = 0;
        let mut unselected_seen = 0;
        for index in 0..node.children_count() {
            let is_selected = match node.child(index) {
                Some(slot) if slot.is_realized() => match self.selection_state_at(id, index)? {
                    SelectionState::PartiallySelected => {
                        return Ok(SelectionState::PartiallySelected)
                    }
                    SelectionState::Selected => true,
                    SelectionState::NotSelected => false,
                },
                _ => node.is_selected(index),
            };

            if is_selected {
                selected_seen += 1;
            } else {
                unselected_seen += 1;
            }
            if selected_seen > 0 && unselected_seen > 0 {
                return Ok(SelectionState::PartiallySelected);
            }
        }

        Ok(if selected_seen != 0 && selected_seen != data_count {
            SelectionState::PartiallySelected
        } else if selected_seen == data_count {
            SelectionState::Selected
        } else {
            SelectionState::NotSelected
        })
    }

    /// Render every realized level as an indented checklist.
    ///
    /// One line per position: `[x]` selected, `[-]` partial, `[ ]` not
    /// selected, followed by the index. Nested nodes follow their position,
    /// indented by two spaces per level.
    pub fn describe(&self) -> SelectionResult<String> {
        let mut out = String::new();
        self.describe_node(self.root, 0, &mut out)?;
        Ok(out)
    }

    fn describe_node(&self, id: NodeId, depth: usize, out: &mut String) -> SelectionResult<()> {
        let node = self.node(id)?;
        let indent = "  ".repeat(depth);
        for index in 0..node.len() {
            let state = self.selection_state_at(id, index)?;
            out.push_str(&format!("{}{} {}\n", indent, state.checkbox(), index));
            if let Some(ChildSlot::Node(child)) = node.child(index) {
                self.describe_node(child, depth + 1, out)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select or deselect position `index` of node `id`.
    ///
    /// Returns `false` for an invalid index. In single-select mode selecting
    /// replaces the node's current selection.
    pub fn select(&mut self, id: NodeId, index: usize, select: bool) -> SelectionResult<bool> {
        if select && self.config.single_select {
            return self.set_selected_index(id, Some(index));
        }
        Ok(self.node_mut(id)?.select(index, select))
    }

    pub fn deselect(&mut self, id: NodeId, index: usize) -> SelectionResult<bool> {
        self.select(id, index, false)
    }

    pub fn toggle_select(&mut self, id: NodeId, index: usize) -> SelectionResult<bool> {
        let selected = self.node(id)?.is_selected(index);
        self.select(id, index, !selected)
    }

    /// Select or deselect a whole range; both ends must be valid.
    ///
    /// Selecting a range is refused in single-select mode.
    pub fn select_range(&mut self, id: NodeId, range: IndexRange, select: bool) -> SelectionResult<bool> {
        if select && self.config.single_select {
            log::debug!("range selection refused in single-select mode");
            return Ok(false);
        }
        Ok(self.node_mut(id)?.select_range(range, select))
    }

    /// Select every position of node `id`.
    ///
    /// Returns `false` in single-select mode, where nothing changes.
    pub fn select_all(&mut self, id: NodeId) -> SelectionResult<bool> {
        if self.config.single_select {
            log::debug!("select all refused in single-select mode");
            return Ok(false);
        }
        self.node_mut(id)?.select_all();
        Ok(true)
    }

    /// Drop the selection of node `id` together with all of its realized children
    pub fn clear(&mut self, id: NodeId) -> SelectionResult<()> {
        let dropped = self.node_mut(id)?.reset_selection();
        self.discard(dropped);
        Ok(())
    }

    /// Make `index` the only selected position of node `id`, or clear it with `None`.
    ///
    /// Returns `false` for an invalid index, leaving the selection untouched.
    pub fn set_selected_index(&mut self, id: NodeId, index: Option<usize>) -> SelectionResult<bool> {
        let Some(index) = index else {
            self.clear(id)?;
            return Ok(true);
        };

        let node = self.node(id)?;
        if !node.is_valid_index(index) {
            return Ok(false);
        }
        if node.selected_count() == 1 && node.is_selected(index) {
            return Ok(true);
        }

        self.clear(id)?;
        Ok(self.node_mut(id)?.select(index, true))
    }

    pub fn anchor_index(&self, id: NodeId) -> SelectionResult<Option<usize>> {
        Ok(self.node(id)?.anchor_index())
    }

    pub fn set_anchor_index(&mut self, id: NodeId, anchor: Option<usize>) -> SelectionResult<()> {
        self.node_mut(id)?.set_anchor_index(anchor);
        Ok(())
    }

    /// Select the first root item when auto-select is on and nothing is selected
    fn auto_select_root(&mut self) -> bool {
        if !self.config.auto_select {
            return false;
        }
        let Some(root) = self.nodes.get_mut(self.root) else {
            return false;
        };
        if root.selected_count() > 0 || root.is_empty() {
            return false;
        }
        log::debug!("auto-selecting the first root item");
        root.select(0, true)
    }
}

/// State of a node none of whose children were realized.
///
/// Every position is then judged by the node's own ranges, so the counts decide.
fn leaf_level_state(selected: usize, data_count: usize) -> SelectionState {
    if selected == 0 {
        SelectionState::NotSelected
    } else if selected == data_count {
        SelectionState::Selected
    } else {
        SelectionState::PartiallySelected
    }
}
