pub(crate) mod config;
pub use config::{Config, ConfigError, DATA_DIR_ENV};

pub(crate) mod id;
pub use id::{ItemId, WorkspaceId};

pub(crate) mod item;
pub use item::{Folder, LaunchItem};

pub(crate) mod recent;
pub use recent::{MAX_RECENT_LAUNCHES, RecentLaunch, RecentLaunches};

pub(crate) mod document;
pub use document::error::DocumentError;
pub use document::versioned_document::parse as parse_document;
pub use document::{WindowGeometry, WorkspaceDocument};

pub(crate) mod workspace;
pub use workspace::{
    ColorTag, MAX_WORKSPACE_NAME_LENGTH, WorkspaceConfig, WorkspaceInfo, WorkspaceName,
    WorkspaceNameError,
};

pub(crate) mod export;
pub use export::WorkspaceExport;
