use crate::types::{WindowGeometry, WorkspaceId};
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_WORKSPACE_NAME_LENGTH: usize = 128;

const FALLBACK_WORKSPACE_NAME: &str = "New Workspace";

/// User-supplied workspace name: trimmed, non-empty.
#[nutype(
    new_unchecked,
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_WORKSPACE_NAME_LENGTH),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Into, Display)
)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn fallback() -> Self {
        // SAFETY: the literal is trimmed, non-empty and shorter than the limit.
        unsafe { Self::new_unchecked(FALLBACK_WORKSPACE_NAME.to_string()) }
    }

    /// Accepts any stored name: overlong names are cut to the length limit and
    /// only blank ones become the fallback name.
    pub fn or_fallback(raw: &str) -> Self {
        let truncated: String = raw.trim().chars().take(MAX_WORKSPACE_NAME_LENGTH).collect();
        Self::try_new(truncated).unwrap_or_else(|_| Self::fallback())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
}

impl ColorTag {
    pub const ALL: [ColorTag; 5] = [
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Red,
        ColorTag::Yellow,
        ColorTag::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Blue => "Blue",
            ColorTag::Green => "Green",
            ColorTag::Red => "Red",
            ColorTag::Yellow => "Yellow",
            ColorTag::Purple => "Purple",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Unknown or malformed tags read as no tag rather than failing the document.
pub(crate) fn deserialize_color_tag<'de, D>(deserializer: D) -> Result<Option<ColorTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_color_tag")]
    pub color_tag: Option<ColorTag>,
    /// Derived from the workspace document; refreshed on every commit.
    pub app_count: usize,
}

impl WorkspaceInfo {
    pub fn new(name: WorkspaceName, color_tag: Option<ColorTag>, now: DateTime<Utc>) -> Self {
        Self {
            id: WorkspaceId::new(),
            name: name.into_inner(),
            created_at: now,
            last_modified_at: now,
            color_tag,
            app_count: 0,
        }
    }
}

/// Process-wide configuration: the workspace list and which one is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WorkspaceConfig {
    pub version: u32,
    pub workspaces: Vec<WorkspaceInfo>,
    pub active_workspace_id: Option<WorkspaceId>,
    pub default_workspace_id: Option<WorkspaceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_state: Option<WindowGeometry>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            workspaces: Vec::new(),
            active_workspace_id: None,
            default_workspace_id: None,
            window_state: None,
        }
    }
}

impl WorkspaceConfig {
    pub const VERSION: u32 = 1;

    pub fn find(&self, id: WorkspaceId) -> Option<&WorkspaceInfo> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn find_mut(&mut self, id: WorkspaceId) -> Option<&mut WorkspaceInfo> {
        self.workspaces.iter_mut().find(|w| w.id == id)
    }

    pub fn contains(&self, id: WorkspaceId) -> bool {
        self.find(id).is_some()
    }

    /// Active workspace if it still exists, else the default, else the first one.
    pub fn resolved_active_id(&self) -> Option<WorkspaceId> {
        [self.active_workspace_id, self.default_workspace_id]
            .into_iter()
            .flatten()
            .find(|id| self.contains(*id))
            .or_else(|| self.workspaces.first().map(|w| w.id))
    }
}
