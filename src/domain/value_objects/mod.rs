//! Value Objects
//!
//! Immutable types that describe selection without owning any tree state.

mod index_path;
mod index_range;
mod invalidation_report;
mod selection_state;

pub use index_path::IndexPath;
pub use index_range::IndexRange;
pub use invalidation_report::InvalidationReport;
pub use selection_state::SelectionState;
