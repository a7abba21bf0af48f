use std::path::PathBuf;
use thiserror::Error;

/// Overrides the data directory, mostly for portable installs and tests.
pub const DATA_DIR_ENV: &str = "ACERUN_DATA_DIR";

const APP_DIR_NAME: &str = "AceRun";

/// Core configuration for AceRunCore initialization.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    /// Resolves the per-user data directory: `$ACERUN_DATA_DIR`, else the
    /// platform local data directory joined with `AceRun`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_path = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::data_local_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(APP_DIR_NAME),
        };
        Ok(Self { base_path })
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_path.join("config.json")
    }

    pub fn workspaces_path(&self) -> PathBuf {
        self.base_path.join("workspaces")
    }

    /// Copy of an unreadable config, kept when the workspace list is rebuilt.
    pub fn config_backup_path(&self) -> PathBuf {
        self.base_path.join("config.json.bak")
    }

    /// Single-document file written before workspaces existed.
    pub fn legacy_data_path(&self) -> PathBuf {
        self.base_path.join("apps.json")
    }

    pub fn legacy_backup_path(&self) -> PathBuf {
        self.base_path.join("apps.json.bak")
    }

    pub fn icons_path(&self) -> PathBuf {
        self.base_path.join("icons")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No local data directory available; set ACERUN_DATA_DIR")]
    NoDataDir,
}
