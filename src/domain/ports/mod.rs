//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the selection tree.
//! Callers provide the concrete collections and resolvers.

pub mod path_resolver;
pub mod source_list;

pub use path_resolver::{LeafResolver, PathResolver};
pub use source_list::{ListMutation, SourceList};
