//! JSON persistence of the workspace config and per-workspace documents.
//!
//! Load operations never fail at this boundary: missing or unreadable files
//! become defaults after a warning. The `try_` variants keep the error.

use crate::types::document::versioned_document;
use crate::types::{Config, WorkspaceConfig, WorkspaceDocument, WorkspaceId};
use error::StoreError;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migration;
mod workspaces;

pub mod error {
    use crate::types::{DocumentError, WorkspaceId};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),

        #[error("Document error: {0}")]
        Document(#[from] DocumentError),

        #[error("Workspace not found: {0}")]
        WorkspaceNotFound(WorkspaceId),

        #[error("The last remaining workspace cannot be deleted")]
        LastWorkspace,

        #[error("Workspace order must list every workspace exactly once")]
        InvalidOrder,

        #[error("Not a valid workspace export: {0}")]
        InvalidExport(String),
    }
}

pub struct WorkspaceStore {
    config_path: PathBuf,
    config_backup_path: PathBuf,
    workspaces_path: PathBuf,
    legacy_data_path: PathBuf,
    legacy_backup_path: PathBuf,
}

impl WorkspaceStore {
    pub fn new(config: &Config) -> Self {
        Self {
            config_path: config.config_path(),
            config_backup_path: config.config_backup_path(),
            workspaces_path: config.workspaces_path(),
            legacy_data_path: config.legacy_data_path(),
            legacy_backup_path: config.legacy_backup_path(),
        }
    }

    pub fn workspace_path(&self, id: WorkspaceId) -> PathBuf {
        self.workspaces_path.join(format!("{id}.json"))
    }
}

/// Config operations.
impl WorkspaceStore {
    /// `Ok(None)` when no config has been written yet.
    pub fn try_load_config(&self) -> Result<Option<WorkspaceConfig>, StoreError> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.config_path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Empty config (no workspaces) when absent or unreadable.
    pub fn load_config(&self) -> WorkspaceConfig {
        match self.try_load_config() {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable config {}: {e}",
                    self.config_path.display()
                );
                WorkspaceConfig::default()
            }
        }
    }

    pub fn save_config(&self, config: &WorkspaceConfig) -> Result<(), StoreError> {
        write_json(&self.config_path, config)
    }

    /// Keeps the current config file around as `.bak` before it is replaced.
    fn back_up_config(&self) -> Result<(), StoreError> {
        if self.config_path.exists() {
            std::fs::copy(&self.config_path, &self.config_backup_path)?;
            log::info!("Kept previous config as {}", self.config_backup_path.display());
        }
        Ok(())
    }
}

/// Workspace document operations.
impl WorkspaceStore {
    pub fn try_load_workspace(&self, id: WorkspaceId) -> Result<WorkspaceDocument, StoreError> {
        let path = self.workspace_path(id);
        if !path.exists() {
            return Ok(WorkspaceDocument::default());
        }
        let json = std::fs::read_to_string(&path)?;
        Ok(versioned_document::parse(&json)?)
    }

    /// Empty document when absent or unreadable.
    pub fn load_workspace(&self, id: WorkspaceId) -> WorkspaceDocument {
        self.try_load_workspace(id).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable workspace {id}: {e}");
            WorkspaceDocument::default()
        })
    }

    pub fn save_workspace(
        &self,
        id: WorkspaceId,
        document: &WorkspaceDocument,
    ) -> Result<(), StoreError> {
        write_json(&self.workspace_path(id), document)
    }

    /// No-op when the file is already gone.
    pub fn delete_workspace_file(&self, id: WorkspaceId) -> Result<(), StoreError> {
        match std::fs::remove_file(self.workspace_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of every workspace document present on disk, sorted.
    pub fn workspace_ids_on_disk(&self) -> Result<Vec<WorkspaceId>, StoreError> {
        if !self.workspaces_path.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.workspaces_path)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().is_some_and(|e| e == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && let Ok(uuid) = stem.parse()
            {
                ids.push(WorkspaceId::from_uuid(uuid));
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Legacy single-document operations.
impl WorkspaceStore {
    pub fn try_load_legacy_document(&self) -> Result<Option<WorkspaceDocument>, StoreError> {
        if !self.legacy_data_path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.legacy_data_path)?;
        versioned_document::parse(&json)
            .map(Some)
            .map_err(StoreError::from)
    }

    fn load_legacy_document(&self) -> WorkspaceDocument {
        match self.try_load_legacy_document() {
            Ok(document) => document.unwrap_or_default(),
            Err(e) => {
                log::warn!(
                    "Legacy data {} unreadable, starting empty: {e}",
                    self.legacy_data_path.display()
                );
                WorkspaceDocument::default()
            }
        }
    }

    /// Keeps the legacy file around as `.bak` for manual recovery.
    fn archive_legacy_document(&self) {
        if !self.legacy_data_path.exists() {
            return;
        }
        if let Err(e) = std::fs::rename(&self.legacy_data_path, &self.legacy_backup_path) {
            log::warn!(
                "Could not archive {} to {}: {e}",
                self.legacy_data_path.display(),
                self.legacy_backup_path.display()
            );
        }
    }
}

/// Writes through a temp file in the same directory, so the destination holds
/// either the old or the new contents.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let json = serde_json::to_vec_pretty(value)?;
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&json)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
