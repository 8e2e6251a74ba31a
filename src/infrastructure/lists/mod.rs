//! In-memory source lists

mod shared;

pub use shared::SharedList;
