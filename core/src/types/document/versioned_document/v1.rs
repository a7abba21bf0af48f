//! Oldest format: a bare array of launch items.

use super::DocumentVariant;
use crate::types::{LaunchItem, WorkspaceDocument};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Vec<LaunchItem>);

impl DocumentVariant for Document {
    const VERSION: u32 = 1;

    fn recognizes(value: &Value) -> bool {
        value.is_array()
    }

    fn into_latest(self) -> WorkspaceDocument {
        WorkspaceDocument {
            ungrouped_items: self.0,
            ..WorkspaceDocument::default()
        }
    }
}
