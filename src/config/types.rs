//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SelectionResult;

use super::loader;

/// Behaviour switches for a [`SelectionTree`](crate::SelectionTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionConfig {
    /// Select the first root item whenever the root list is non-empty and
    /// nothing at the root is selected
    #[serde(default)]
    pub auto_select: bool,

    /// At most one selected position per node
    #[serde(default)]
    pub single_select: bool,
}

/// Non-fatal configuration warning (e.g. an unknown key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl SelectionConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> SelectionResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SelectionResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SelectionResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (SELTREE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
