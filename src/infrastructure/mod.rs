//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `lists/` - Source list implementations (SharedList)

pub mod lists;

// Re-export for convenience
pub use lists::SharedList;
