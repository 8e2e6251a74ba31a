//! SelectionState value object - tri-state selection of a tree position
//!
//! - `Selected`: the position, or every descendant of it, is selected
//! - `NotSelected`: nothing at or below the position is selected
//! - `PartiallySelected`: some but not all descendants are selected

use serde::{Deserialize, Serialize};

/// Selection state for a position in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// All items selected ([x])
    Selected,
    /// No items selected ([ ])
    #[default]
    NotSelected,
    /// Some but not all items selected ([-])
    PartiallySelected,
}

impl SelectionState {
    /// Convert to the nullable-boolean convention used at the public boundary.
    ///
    /// `Some(true)` is selected, `Some(false)` is not selected, `None` is partial.
    pub fn as_nullable(self) -> Option<bool> {
        match self {
            SelectionState::Selected => Some(true),
            SelectionState::NotSelected => Some(false),
            SelectionState::PartiallySelected => None,
        }
    }

    pub fn from_nullable(value: Option<bool>) -> Self {
        match value {
            Some(true) => SelectionState::Selected,
            Some(false) => SelectionState::NotSelected,
            None => SelectionState::PartiallySelected,
        }
    }

    pub fn from_selected(selected: bool) -> Self {
        if selected {
            SelectionState::Selected
        } else {
            SelectionState::NotSelected
        }
    }

    /// ASCII checkbox used by [`SelectionTree::describe`](crate::SelectionTree::describe)
    pub fn checkbox(self) -> &'static str {
        match self {
            SelectionState::Selected => "[x]",
            SelectionState::NotSelected => "[ ]",
            SelectionState::PartiallySelected => "[-]",
        }
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionState::Selected => write!(f, "selected"),
            SelectionState::NotSelected => write!(f, "not selected"),
            SelectionState::PartiallySelected => write!(f, "partially selected"),
        }
    }
}
