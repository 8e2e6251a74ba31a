//! seltree - selection tracking for nested, mutating collections
//!
//! A [`SelectionTree`] records which items of a tree of lists are selected.
//! Each level stores its selection as a list of closed index ranges, child
//! levels are only materialized when first asked for, and the tri-state
//! (selected / partial / not selected) of any position is derived on demand.
//!
//! Lists change underneath the tree; the owner reports each change through
//! [`SelectionTree::apply_mutation`] and gets back an [`InvalidationReport`].
//!
//! ```
//! use seltree::{LeafResolver, SelectionConfig, SelectionTree, SharedList};
//!
//! let list: SharedList<u32> = (0..5).collect();
//! let mut tree = SelectionTree::with_source(list.clone(), LeafResolver, SelectionConfig::default());
//! let root = tree.root();
//!
//! tree.select(root, 1, true).unwrap();
//! tree.select(root, 3, true).unwrap();
//!
//! let report = tree.apply_mutation(root, list.remove(0)).unwrap();
//! assert!(report.selection_invalidated);
//! assert_eq!(tree.selected_indices(root).unwrap(), &[0, 2]);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::{ConfigWarning, SelectionConfig};
pub use domain::entities::{ChildSlot, NodeId, SelectionNode, SelectionTree};
pub use domain::ports::{LeafResolver, ListMutation, PathResolver, SourceList};
pub use domain::value_objects::{IndexPath, IndexRange, InvalidationReport, SelectionState};
pub use error::{SelectionError, SelectionResult};
pub use infrastructure::SharedList;
