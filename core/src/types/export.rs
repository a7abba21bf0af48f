use crate::types::document::versioned_document;
use crate::types::workspace::deserialize_color_tag;
use crate::types::{ColorTag, WorkspaceDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `.acerun` interchange envelope around one workspace's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkspaceExport {
    #[serde(default = "current_format_version")]
    pub ace_run_version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_color_tag")]
    pub color_tag: Option<ColorTag>,
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_document")]
    pub app_data: WorkspaceDocument,
}

impl WorkspaceExport {
    pub const FORMAT_VERSION: u32 = 1;
    pub const FILE_EXTENSION: &str = "acerun";
}

fn current_format_version() -> u32 {
    WorkspaceExport::FORMAT_VERSION
}

/// Exports made from any document generation stay importable.
fn deserialize_document<'de, D>(deserializer: D) -> Result<WorkspaceDocument, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    versioned_document::from_value(&value).map_err(serde::de::Error::custom)
}
