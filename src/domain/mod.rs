//! Domain Layer
//!
//! The selection model itself: plain data structures with no I/O.
//!
//! ## Structure
//!
//! - `entities/` - Selection nodes and the tree that owns them
//! - `value_objects/` - Immutable value types (IndexRange, IndexPath, SelectionState)
//! - `ports/` - Interface definitions for source lists and path resolvers

pub mod entities;
pub mod ports;
pub mod value_objects;
