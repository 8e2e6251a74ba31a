//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `SelectionNode` - Selection state of one collection level
//! - `SelectionTree` - Arena owning every node of a nested selection

mod selection_node;
mod selection_tree;

pub use selection_node::{ChildSlot, NodeId, SelectionNode};
pub use selection_tree::SelectionTree;
