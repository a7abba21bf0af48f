use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A registered executable with its launch parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LaunchItem {
    pub id: ItemId,
    pub display_name: String,
    pub file_path: String,
    pub arguments: String,
    pub working_directory: String,
    pub run_as_admin: bool,
    /// Empty when the executable's own icon is used.
    pub custom_icon_path: String,
}

impl LaunchItem {
    pub fn new(display_name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            display_name: display_name.into(),
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn custom_icon(&self) -> Option<&Path> {
        if self.custom_icon_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.custom_icon_path))
        }
    }

    /// Whether `other` would resolve its icon from a different file.
    /// Cached icons are keyed by id only, so callers invalidate on `true`.
    pub fn icon_source_differs(&self, other: &LaunchItem) -> bool {
        self.file_path != other.file_path || self.custom_icon_path != other.custom_icon_path
    }
}

/// One-level grouping of launch items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Folder {
    pub id: ItemId,
    pub display_name: String,
    pub is_expanded: bool,
    pub children: Vec<LaunchItem>,
}

impl Folder {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }
}

impl Default for Folder {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            display_name: String::new(),
            is_expanded: true,
            children: Vec::new(),
        }
    }
}
