//! Tree format: polymorphic `app` / `folder` nodes tagged with `$type`.

use super::DocumentVariant;
use crate::types::{Folder, ItemId, LaunchItem, RecentLaunches, WindowGeometry, WorkspaceDocument};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(default)]
    pub version: u32,
    pub items: Vec<TreeItem>,
    #[serde(default)]
    pub recent_launches: RecentLaunches,
    #[serde(default)]
    pub window_state: Option<WindowGeometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "$type", rename_all = "lowercase")]
pub enum TreeItem {
    App(LaunchItem),
    Folder(TreeFolder),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TreeFolder {
    pub id: ItemId,
    pub display_name: String,
    pub is_expanded: bool,
    pub children: Vec<TreeItem>,
}

impl Default for TreeFolder {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            display_name: String::new(),
            is_expanded: true,
            children: Vec::new(),
        }
    }
}

impl DocumentVariant for Document {
    const VERSION: u32 = 2;

    fn recognizes(value: &Value) -> bool {
        value.as_object().is_some_and(|o| o.contains_key("Items"))
    }

    /// Top-level apps become ungrouped; each top-level folder keeps every app
    /// of its subtree, depth first, so deeper folders collapse into it.
    fn into_latest(self) -> WorkspaceDocument {
        let mut document = WorkspaceDocument {
            recent_launches: self.recent_launches,
            window_state: self.window_state,
            ..WorkspaceDocument::default()
        };

        for node in self.items {
            match node {
                TreeItem::App(item) => document.ungrouped_items.push(item),
                TreeItem::Folder(tree_folder) => {
                    let mut children = Vec::new();
                    collect_apps(tree_folder.children, &mut children);
                    document.folders.push(Folder {
                        id: tree_folder.id,
                        display_name: tree_folder.display_name,
                        is_expanded: tree_folder.is_expanded,
                        children,
                    });
                }
            }
        }
        document
    }
}

fn collect_apps(nodes: Vec<TreeItem>, out: &mut Vec<LaunchItem>) {
    for node in nodes {
        match node {
            TreeItem::App(item) => out.push(item),
            TreeItem::Folder(folder) => collect_apps(folder.children, out),
        }
    }
}
