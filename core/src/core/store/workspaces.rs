use super::error::StoreError;
use super::{WorkspaceStore, write_json};
use crate::types::{
    ColorTag, WorkspaceConfig, WorkspaceDocument, WorkspaceExport, WorkspaceId, WorkspaceInfo,
    WorkspaceName,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;

fn info_mut(
    config: &mut WorkspaceConfig,
    id: WorkspaceId,
) -> Result<&mut WorkspaceInfo, StoreError> {
    config
        .find_mut(id)
        .ok_or(StoreError::WorkspaceNotFound(id))
}

/// Workspace lifecycle. Every operation persists the config it mutates, and
/// `config` is only updated once that write has succeeded.
impl WorkspaceStore {
    /// Applies `change` to a copy of `config`, saves it, then swaps it in.
    fn update_config<T>(
        &self,
        config: &mut WorkspaceConfig,
        change: impl FnOnce(&mut WorkspaceConfig) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut updated = config.clone();
        let result = change(&mut updated)?;
        self.save_config(&updated)?;
        *config = updated;
        Ok(result)
    }

    /// Adds a workspace holding `contents` under a fresh id.
    pub fn create_workspace(
        &self,
        config: &mut WorkspaceConfig,
        name: WorkspaceName,
        color_tag: Option<ColorTag>,
        contents: &WorkspaceDocument,
        now: DateTime<Utc>,
    ) -> Result<WorkspaceInfo, StoreError> {
        let mut info = WorkspaceInfo::new(name, color_tag, now);
        info.app_count = contents.item_count();

        let document = WorkspaceDocument {
            window_state: None,
            ..contents.clone()
        };
        self.save_workspace(info.id, &document)?;

        let result = self.update_config(config, |config| {
            config.workspaces.push(info.clone());
            Ok(())
        });
        if let Err(e) = result {
            let _ = self.delete_workspace_file(info.id);
            return Err(e);
        }
        log::info!("Created workspace {} ({})", info.name, info.id);
        Ok(info)
    }

    /// Rejects deleting the last workspace before touching anything. The
    /// document file is removed only after the config no longer lists it.
    pub fn delete_workspace(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
    ) -> Result<WorkspaceInfo, StoreError> {
        if config.workspaces.len() <= 1 {
            return Err(StoreError::LastWorkspace);
        }

        let removed = self.update_config(config, |config| {
            let index = config
                .workspaces
                .iter()
                .position(|w| w.id == id)
                .ok_or(StoreError::WorkspaceNotFound(id))?;

            let removed = config.workspaces.remove(index);
            let first = config.workspaces[0].id;
            if config.active_workspace_id == Some(id) {
                config.active_workspace_id = Some(first);
            }
            if config.default_workspace_id == Some(id) {
                config.default_workspace_id = Some(first);
            }
            Ok(removed)
        })?;

        if let Err(e) = self.delete_workspace_file(id) {
            log::warn!("Workspace {id} removed from config but its file remains: {e}");
        }
        log::info!("Deleted workspace {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    pub fn rename_workspace(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
        name: WorkspaceName,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let name = name.into_inner();
        if info_mut(config, id)?.name == name {
            return Ok(());
        }
        self.update_config(config, |config| {
            let info = info_mut(config, id)?;
            info.name = name;
            info.last_modified_at = now;
            Ok(())
        })
    }

    pub fn set_color_tag(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
        color_tag: Option<ColorTag>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.update_config(config, |config| {
            let info = info_mut(config, id)?;
            info.color_tag = color_tag;
            info.last_modified_at = now;
            Ok(())
        })
    }

    pub fn set_default_workspace(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
    ) -> Result<(), StoreError> {
        self.update_config(config, |config| {
            if !config.contains(id) {
                return Err(StoreError::WorkspaceNotFound(id));
            }
            config.default_workspace_id = Some(id);
            Ok(())
        })
    }

    pub fn set_active_workspace(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
    ) -> Result<(), StoreError> {
        self.update_config(config, |config| {
            if !config.contains(id) {
                return Err(StoreError::WorkspaceNotFound(id));
            }
            config.active_workspace_id = Some(id);
            Ok(())
        })
    }

    /// `order` must be a permutation of the current workspace ids.
    pub fn reorder_workspaces(
        &self,
        config: &mut WorkspaceConfig,
        order: &[WorkspaceId],
    ) -> Result<(), StoreError> {
        self.update_config(config, |config| {
            let requested: HashSet<_> = order.iter().copied().collect();
            let current: HashSet<_> = config.workspaces.iter().map(|w| w.id).collect();
            if requested.len() != order.len() || requested != current {
                return Err(StoreError::InvalidOrder);
            }

            config
                .workspaces
                .sort_by_key(|w| order.iter().position(|id| *id == w.id));
            Ok(())
        })
    }

    /// Saves a workspace's document and refreshes its derived metadata.
    pub fn commit_workspace(
        &self,
        config: &mut WorkspaceConfig,
        id: WorkspaceId,
        document: &WorkspaceDocument,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !config.contains(id) {
            return Err(StoreError::WorkspaceNotFound(id));
        }
        self.save_workspace(id, document)?;

        self.update_config(config, |config| {
            let info = info_mut(config, id)?;
            info.app_count = document.item_count();
            info.last_modified_at = now;
            Ok(())
        })
    }
}

/// `.acerun` import and export.
impl WorkspaceStore {
    pub fn export_workspace(
        &self,
        config: &WorkspaceConfig,
        id: WorkspaceId,
        destination: &Path,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let info = config.find(id).ok_or(StoreError::WorkspaceNotFound(id))?;
        let export = WorkspaceExport {
            ace_run_version: WorkspaceExport::FORMAT_VERSION,
            name: info.name.clone(),
            color_tag: info.color_tag,
            exported_at: now,
            app_data: self.try_load_workspace(id)?,
        };
        write_json(destination, &export)?;
        log::info!("Exported workspace {} to {}", info.id, destination.display());
        Ok(())
    }

    /// The imported workspace always gets a new id, and its items new
    /// identities, so nothing collides with what is already installed.
    pub fn import_workspace(
        &self,
        config: &mut WorkspaceConfig,
        source: &Path,
        now: DateTime<Utc>,
    ) -> Result<WorkspaceInfo, StoreError> {
        let json = std::fs::read_to_string(source)?;
        let export: WorkspaceExport =
            serde_json::from_str(&json).map_err(|e| StoreError::InvalidExport(e.to_string()))?;

        let name = WorkspaceName::or_fallback(&export.name);
        let contents = export.app_data.with_fresh_ids();
        self.create_workspace(config, name, export.color_tag, &contents, now)
    }
}
