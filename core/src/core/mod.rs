//! Session facade combining the workspace store, the active document and the icon cache.

use crate::core::icon_cache::{IconCache, IconExtractor};
use crate::core::store::WorkspaceStore;
use crate::core::store::error::StoreError;
use crate::types::{
    ColorTag, Config, DocumentError, Folder, ItemId, LaunchItem, RecentLaunch, WindowGeometry,
    WorkspaceConfig, WorkspaceDocument, WorkspaceId, WorkspaceInfo, WorkspaceName,
};
use chrono::{DateTime, Utc};
use error::AceRunError;
use image::DynamicImage;
use std::path::{Path, PathBuf};

pub mod icon_cache;
pub mod store;

pub use store::migration::{DEFAULT_WORKSPACE_NAME, default_workspace_id};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum AceRunError {
        #[error("Store error: {0}")]
        Store(#[from] StoreError),

        #[error("Document error: {0}")]
        Document(#[from] DocumentError),

        #[error("No workspace available")]
        NoWorkspace,
    }
}

/// What a new workspace starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceSeed {
    Blank,
    /// Copy of the active workspace with fresh item identities.
    CopyActive,
}

pub struct AceRunCore {
    base_path: PathBuf,
    store: WorkspaceStore,
    icons: IconCache,
    config: WorkspaceConfig,
    active_id: WorkspaceId,
    document: WorkspaceDocument,
}

impl AceRunCore {
    /// Migrates legacy data if needed and loads the active workspace.
    pub fn open(
        config: Config,
        extractor: impl IconExtractor + 'static,
        now: DateTime<Utc>,
    ) -> Result<Self, AceRunError> {
        let store = WorkspaceStore::new(&config);
        let icons = IconCache::new(config.icons_path(), extractor);

        let workspace_config = store.try_migrate_or_initialize(now)?;
        let active_id = workspace_config
            .resolved_active_id()
            .ok_or(AceRunError::NoWorkspace)?;
        let document = store.load_workspace(active_id);

        let mut core = Self {
            base_path: config.base_path,
            store,
            icons,
            config: workspace_config,
            active_id,
            document,
        };
        if core.config.active_workspace_id != Some(active_id) {
            core.store.set_active_workspace(&mut core.config, active_id)?;
        }
        if core.document.purge_stale_recents() {
            core.commit(now)?;
        }

        log::info!(
            "Opened workspace {} with {} item(s) at {}",
            core.active_id,
            core.document.item_count(),
            core.base_path.display()
        );
        Ok(core)
    }

    pub fn data_dir(&self) -> &Path {
        &self.base_path
    }

    pub fn workspace_config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn active_workspace_id(&self) -> WorkspaceId {
        self.active_id
    }

    pub fn active_workspace(&self) -> Option<&WorkspaceInfo> {
        self.config.find(self.active_id)
    }

    pub fn document(&self) -> &WorkspaceDocument {
        &self.document
    }

    pub fn recent_launches(&self) -> &[RecentLaunch] {
        self.document.recent_launches.as_slice()
    }

    fn commit(&mut self, now: DateTime<Utc>) -> Result<(), AceRunError> {
        self.store
            .commit_workspace(&mut self.config, self.active_id, &self.document, now)?;
        Ok(())
    }
}

/// Item operations on the active workspace. Each one is persisted immediately.
impl AceRunCore {
    pub fn add_item(
        &mut self,
        item: LaunchItem,
        folder: Option<ItemId>,
        now: DateTime<Utc>,
    ) -> Result<ItemId, AceRunError> {
        let id = item.id;
        self.document.add_item(item, folder)?;
        self.commit(now)?;
        Ok(id)
    }

    pub fn add_folder(
        &mut self,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<ItemId, AceRunError> {
        let folder = Folder::new(display_name);
        let id = folder.id;
        self.document.add_folder(folder)?;
        self.commit(now)?;
        Ok(id)
    }

    /// Replaces an item's fields. A changed executable or custom icon drops its cached icon.
    pub fn update_item(&mut self, item: LaunchItem, now: DateTime<Utc>) -> Result<(), AceRunError> {
        let id = item.id;
        let previous = self.document.replace_item(item)?;
        if let Some(current) = self.document.find_item(id)
            && previous.icon_source_differs(current)
        {
            self.icons.invalidate(id);
        }
        self.commit(now)
    }

    pub fn remove_item(&mut self, id: ItemId, now: DateTime<Utc>) -> Result<LaunchItem, AceRunError> {
        let item = self.document.remove_item(id)?;
        self.icons.invalidate(id);
        self.commit(now)?;
        Ok(item)
    }

    /// Removes a folder and everything in it.
    pub fn remove_folder(&mut self, id: ItemId, now: DateTime<Utc>) -> Result<Folder, AceRunError> {
        let folder = self.document.remove_folder(id)?;
        for child in &folder.children {
            self.icons.invalidate(child.id);
        }
        self.commit(now)?;
        Ok(folder)
    }

    pub fn move_item(
        &mut self,
        id: ItemId,
        destination: Option<ItemId>,
        index: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        self.document.move_item(id, destination, index)?;
        self.commit(now)
    }

    pub fn rename_folder(
        &mut self,
        id: ItemId,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        self.document.rename_folder(id, display_name)?;
        self.commit(now)
    }

    pub fn set_folder_expanded(
        &mut self,
        id: ItemId,
        expanded: bool,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        self.document.set_folder_expanded(id, expanded)?;
        self.commit(now)
    }

    /// Records that the item was launched. Starting the process is the caller's job.
    pub fn record_launch(&mut self, id: ItemId, now: DateTime<Utc>) -> Result<(), AceRunError> {
        self.document.record_launch(id)?;
        self.commit(now)
    }

    pub fn icon(&self, id: ItemId) -> Option<DynamicImage> {
        let item = self.document.find_item(id)?;
        self.icons
            .get(Path::new(&item.file_path), id, item.custom_icon())
    }

    pub fn icon_cache(&self) -> &IconCache {
        &self.icons
    }
}

/// Workspace management.
impl AceRunCore {
    pub fn switch_workspace(&mut self, id: WorkspaceId, now: DateTime<Utc>) -> Result<(), AceRunError> {
        if id == self.active_id {
            return Ok(());
        }
        self.store.set_active_workspace(&mut self.config, id)?;
        self.load_active(id, now)
    }

    pub fn create_workspace(
        &mut self,
        name: WorkspaceName,
        color_tag: Option<ColorTag>,
        seed: WorkspaceSeed,
        now: DateTime<Utc>,
    ) -> Result<WorkspaceInfo, AceRunError> {
        let contents = match seed {
            WorkspaceSeed::Blank => WorkspaceDocument::default(),
            WorkspaceSeed::CopyActive => self.document.with_fresh_ids(),
        };
        Ok(self
            .store
            .create_workspace(&mut self.config, name, color_tag, &contents, now)?)
    }

    pub fn rename_workspace(
        &mut self,
        id: WorkspaceId,
        name: WorkspaceName,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        Ok(self.store.rename_workspace(&mut self.config, id, name, now)?)
    }

    pub fn set_workspace_color(
        &mut self,
        id: WorkspaceId,
        color_tag: Option<ColorTag>,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        Ok(self.store.set_color_tag(&mut self.config, id, color_tag, now)?)
    }

    pub fn set_default_workspace(&mut self, id: WorkspaceId) -> Result<(), AceRunError> {
        Ok(self.store.set_default_workspace(&mut self.config, id)?)
    }

    pub fn reorder_workspaces(&mut self, order: &[WorkspaceId]) -> Result<(), AceRunError> {
        Ok(self.store.reorder_workspaces(&mut self.config, order)?)
    }

    /// Fails with [`StoreError::LastWorkspace`] when `id` is the only workspace.
    /// Deleting the active workspace switches to the first remaining one.
    pub fn delete_workspace(&mut self, id: WorkspaceId, now: DateTime<Utc>) -> Result<(), AceRunError> {
        let doomed = if id == self.active_id {
            self.document.clone()
        } else {
            self.store.load_workspace(id)
        };

        self.store.delete_workspace(&mut self.config, id)?;
        for item in doomed.items() {
            self.icons.invalidate(item.id);
        }

        if id == self.active_id {
            let next = self
                .config
                .resolved_active_id()
                .ok_or(AceRunError::NoWorkspace)?;
            self.load_active(next, now)?;
        }
        Ok(())
    }

    pub fn export_workspace(
        &self,
        id: WorkspaceId,
        destination: &Path,
        now: DateTime<Utc>,
    ) -> Result<(), AceRunError> {
        Ok(self
            .store
            .export_workspace(&self.config, id, destination, now)?)
    }

    pub fn import_workspace(
        &mut self,
        source: &Path,
        now: DateTime<Utc>,
    ) -> Result<WorkspaceInfo, AceRunError> {
        Ok(self.store.import_workspace(&mut self.config, source, now)?)
    }

    pub fn set_window_geometry(&mut self, geometry: WindowGeometry) -> Result<(), AceRunError> {
        self.config.window_state = Some(geometry);
        Ok(self.store.save_config(&self.config)?)
    }

    fn load_active(&mut self, id: WorkspaceId, now: DateTime<Utc>) -> Result<(), AceRunError> {
        self.active_id = id;
        self.document = self.store.load_workspace(id);
        if self.document.purge_stale_recents() {
            self.commit(now)?;
        }
        Ok(())
    }
}
