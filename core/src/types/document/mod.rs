//! The persisted contents of one workspace.

use crate::types::{Folder, ItemId, LaunchItem, RecentLaunches};
use error::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub(crate) mod versioned_document;

pub mod error {
    use crate::types::ItemId;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DocumentError {
        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),

        #[error("Document is not in the version {0} format")]
        Unrecognized(u32),

        #[error("Document matches no known format")]
        UnknownFormat,

        #[error("Item not found: {0}")]
        ItemNotFound(ItemId),

        #[error("Folder not found: {0}")]
        FolderNotFound(ItemId),

        #[error("Id already in use: {0}")]
        DuplicateItem(ItemId),
    }
}

/// Window size as saved by the legacy single-document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub fn is_usable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WorkspaceDocument {
    pub version: u32,
    pub ungrouped_items: Vec<LaunchItem>,
    pub folders: Vec<Folder>,
    pub recent_launches: RecentLaunches,
    /// Only present in documents written before geometry moved to the config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_state: Option<WindowGeometry>,
}

impl Default for WorkspaceDocument {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            ungrouped_items: Vec::new(),
            folders: Vec::new(),
            recent_launches: RecentLaunches::default(),
            window_state: None,
        }
    }
}

/// Queries.
impl WorkspaceDocument {
    pub const VERSION: u32 = 3;

    /// Ungrouped items plus every folder's children.
    pub fn item_count(&self) -> usize {
        self.ungrouped_items.len() + self.folders.iter().map(|f| f.children.len()).sum::<usize>()
    }

    pub fn items(&self) -> impl Iterator<Item = &LaunchItem> {
        self.ungrouped_items
            .iter()
            .chain(self.folders.iter().flat_map(|f| f.children.iter()))
    }

    pub fn item_ids(&self) -> HashSet<ItemId> {
        self.items().map(|item| item.id).collect()
    }

    pub fn find_item(&self, id: ItemId) -> Option<&LaunchItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn find_item_mut(&mut self, id: ItemId) -> Option<&mut LaunchItem> {
        self.ungrouped_items
            .iter_mut()
            .chain(self.folders.iter_mut().flat_map(|f| f.children.iter_mut()))
            .find(|item| item.id == id)
    }

    pub fn find_folder(&self, id: ItemId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Folder holding the item, `None` when ungrouped or absent.
    pub fn folder_of(&self, id: ItemId) -> Option<ItemId> {
        self.folders
            .iter()
            .find(|f| f.children.iter().any(|item| item.id == id))
            .map(|f| f.id)
    }

    /// Whether `id` names any item or folder in the document.
    pub fn contains_id(&self, id: ItemId) -> bool {
        self.find_item(id).is_some() || self.find_folder(id).is_some()
    }

    fn folder_mut(&mut self, id: ItemId) -> Result<&mut Folder, DocumentError> {
        self.folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(DocumentError::FolderNotFound(id))
    }
}

/// Mutations.
impl WorkspaceDocument {
    /// Adds an item to a folder, or to the ungrouped list when `folder` is `None`.
    /// The item's id must not already be in use.
    pub fn add_item(
        &mut self,
        item: LaunchItem,
        folder: Option<ItemId>,
    ) -> Result<(), DocumentError> {
        if self.contains_id(item.id) {
            return Err(DocumentError::DuplicateItem(item.id));
        }
        match folder {
            Some(folder_id) => self.folder_mut(folder_id)?.children.push(item),
            None => self.ungrouped_items.push(item),
        }
        Ok(())
    }

    /// The folder's id and its children's ids must not already be in use.
    pub fn add_folder(&mut self, folder: Folder) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for id in std::iter::once(folder.id).chain(folder.children.iter().map(|c| c.id)) {
            if !seen.insert(id) || self.contains_id(id) {
                return Err(DocumentError::DuplicateItem(id));
            }
        }
        self.folders.push(folder);
        Ok(())
    }

    /// Replaces the stored item with the same id in place. Returns the previous version.
    pub fn replace_item(&mut self, item: LaunchItem) -> Result<LaunchItem, DocumentError> {
        let slot = self
            .find_item_mut(item.id)
            .ok_or(DocumentError::ItemNotFound(item.id))?;
        Ok(std::mem::replace(slot, item))
    }

    /// Removes an item from wherever it lives and forgets its recent launches.
    pub fn remove_item(&mut self, id: ItemId) -> Result<LaunchItem, DocumentError> {
        let item = self.take_item(id)?;
        self.recent_launches.remove(id);
        Ok(item)
    }

    /// Removes a folder together with its children.
    pub fn remove_folder(&mut self, id: ItemId) -> Result<Folder, DocumentError> {
        let index = self
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or(DocumentError::FolderNotFound(id))?;
        let folder = self.folders.remove(index);
        for child in &folder.children {
            self.recent_launches.remove(child.id);
        }
        Ok(folder)
    }

    /// Moves an item into `destination` (ungrouped when `None`) at `index`,
    /// appending when `index` is `None` or past the end.
    pub fn move_item(
        &mut self,
        id: ItemId,
        destination: Option<ItemId>,
        index: Option<usize>,
    ) -> Result<(), DocumentError> {
        if let Some(folder_id) = destination
            && self.find_folder(folder_id).is_none()
        {
            return Err(DocumentError::FolderNotFound(folder_id));
        }

        let item = self.take_item(id)?;
        let target = match destination {
            Some(folder_id) => &mut self.folder_mut(folder_id)?.children,
            None => &mut self.ungrouped_items,
        };
        let index = index.unwrap_or(target.len()).min(target.len());
        target.insert(index, item);
        Ok(())
    }

    pub fn rename_folder(
        &mut self,
        id: ItemId,
        display_name: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.folder_mut(id)?.display_name = display_name.into();
        Ok(())
    }

    pub fn set_folder_expanded(&mut self, id: ItemId, expanded: bool) -> Result<(), DocumentError> {
        self.folder_mut(id)?.is_expanded = expanded;
        Ok(())
    }

    pub fn record_launch(&mut self, id: ItemId) -> Result<(), DocumentError> {
        let item = self
            .find_item(id)
            .cloned()
            .ok_or(DocumentError::ItemNotFound(id))?;
        self.recent_launches.record(&item);
        Ok(())
    }

    /// Drops recent launches of items no longer in the document.
    pub fn purge_stale_recents(&mut self) -> bool {
        let valid = self.item_ids();
        self.recent_launches.purge_stale(&valid)
    }

    /// A copy where every item and folder has a new identity.
    /// Recent launches follow their items.
    pub fn with_fresh_ids(&self) -> Self {
        let mut copy = self.clone();
        let mut mapping = HashMap::new();

        let mut reassign = |item: &mut LaunchItem| {
            let fresh = ItemId::new();
            mapping.insert(item.id, fresh);
            item.id = fresh;
        };

        copy.ungrouped_items.iter_mut().for_each(&mut reassign);
        for folder in &mut copy.folders {
            folder.id = ItemId::new();
            folder.children.iter_mut().for_each(&mut reassign);
        }

        copy.recent_launches.remap(&mapping);
        copy
    }

    fn take_item(&mut self, id: ItemId) -> Result<LaunchItem, DocumentError> {
        if let Some(index) = self.ungrouped_items.iter().position(|item| item.id == id) {
            return Ok(self.ungrouped_items.remove(index));
        }
        for folder in &mut self.folders {
            if let Some(index) = folder.children.iter().position(|item| item.id == id) {
                return Ok(folder.children.remove(index));
            }
        }
        Err(DocumentError::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests;
