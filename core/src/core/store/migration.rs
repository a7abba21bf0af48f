//! One-time move from the legacy single document to workspaces.
//!
//! The config file is the commit point: until it exists, migration reruns from
//! scratch on the next start. The Default workspace has a fixed id so a rerun
//! overwrites its earlier document instead of adding a second one, and the
//! legacy file is archived only after the config is written.

use super::WorkspaceStore;
use super::error::StoreError;
use crate::types::{WorkspaceConfig, WorkspaceDocument, WorkspaceId, WorkspaceInfo};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_WORKSPACE_NAME: &str = "Default";

const DEFAULT_WORKSPACE_SEED: &[u8] = b"acerun:workspace/default";

/// Stable across runs and installations.
pub fn default_workspace_id() -> WorkspaceId {
    WorkspaceId::from_uuid(Uuid::new_v5(&Uuid::NAMESPACE_URL, DEFAULT_WORKSPACE_SEED))
}

impl WorkspaceStore {
    /// Loads the config, migrating legacy data first if no config exists yet.
    /// Write failures are logged and the in-memory config is still returned.
    pub fn migrate_or_initialize(&self, now: DateTime<Utc>) -> WorkspaceConfig {
        self.try_migrate_or_initialize(now).unwrap_or_else(|e| {
            log::warn!("Workspace initialization could not be persisted: {e}");
            let mut config = self.load_config();
            if config.workspaces.is_empty() {
                let (info, _) = default_workspace(WorkspaceDocument::default(), now);
                config.active_workspace_id = Some(info.id);
                config.default_workspace_id = Some(info.id);
                config.workspaces.push(info);
            }
            config
        })
    }

    pub fn try_migrate_or_initialize(
        &self,
        now: DateTime<Utc>,
    ) -> Result<WorkspaceConfig, StoreError> {
        if !self.config_path.exists() {
            return self.migrate_legacy(now);
        }

        // Left behind when a previous migration stopped after saving the config
        if self.legacy_data_path.exists() {
            log::info!("Archiving legacy data left over from an earlier migration");
            self.archive_legacy_document();
        }

        let mut config = self.load_config();
        if config.workspaces.is_empty() {
            log::warn!("Config lists no workspaces, recovering from workspace files");
            self.recover_workspaces(&mut config, now)?;
            self.back_up_config()?;
            self.save_config(&config)?;
        }
        Ok(config)
    }

    fn migrate_legacy(&self, now: DateTime<Utc>) -> Result<WorkspaceConfig, StoreError> {
        log::info!("No workspace config found, migrating legacy data");

        let (info, document) = default_workspace(self.load_legacy_document(), now);
        let window_state = document.window_state;
        let document = WorkspaceDocument {
            window_state: None,
            ..document
        };

        self.save_workspace(info.id, &document)?;
        log::info!(
            "Saved {} item(s) to workspace {}",
            info.app_count,
            info.id
        );

        let config = WorkspaceConfig {
            active_workspace_id: Some(info.id),
            default_workspace_id: Some(info.id),
            window_state,
            workspaces: vec![info],
            ..WorkspaceConfig::default()
        };
        self.save_config(&config)?;

        self.archive_legacy_document();
        log::info!("Migration complete");
        Ok(config)
    }

    /// Rebuilds the workspace list from documents left on disk, or starts a
    /// fresh Default workspace when there are none.
    fn recover_workspaces(
        &self,
        config: &mut WorkspaceConfig,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        for (n, id) in self.workspace_ids_on_disk()?.into_iter().enumerate() {
            let document = self.load_workspace(id);
            config.workspaces.push(WorkspaceInfo {
                id,
                name: format!("Recovered workspace {}", n + 1),
                created_at: now,
                last_modified_at: now,
                color_tag: None,
                app_count: document.item_count(),
            });
        }

        if config.workspaces.is_empty() {
            let (info, document) = default_workspace(WorkspaceDocument::default(), now);
            self.save_workspace(info.id, &document)?;
            config.workspaces.push(info);
        }

        let first = config.workspaces[0].id;
        config.active_workspace_id = Some(first);
        config.default_workspace_id = Some(first);
        Ok(())
    }
}

fn default_workspace(
    document: WorkspaceDocument,
    now: DateTime<Utc>,
) -> (WorkspaceInfo, WorkspaceDocument) {
    let info = WorkspaceInfo {
        id: default_workspace_id(),
        name: DEFAULT_WORKSPACE_NAME.to_string(),
        created_at: now,
        last_modified_at: now,
        color_tag: None,
        app_count: document.item_count(),
    };
    (info, document)
}
