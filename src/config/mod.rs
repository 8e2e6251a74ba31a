//! Configuration module for seltree
//!
//! Configuration hierarchy:
//! 1. Environment variables (SELTREE_*)
//! 2. TOML file (`SelectionConfig::load`)
//! 3. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use types::{ConfigWarning, SelectionConfig};
