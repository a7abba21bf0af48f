//! Current format: ungrouped items plus flat folders.

use super::DocumentVariant;
use crate::types::WorkspaceDocument;
use serde_json::Value;

pub use crate::types::WorkspaceDocument as Document;

impl DocumentVariant for WorkspaceDocument {
    const VERSION: u32 = WorkspaceDocument::VERSION;

    fn recognizes(value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        let versioned = object
            .get("Version")
            .and_then(Value::as_u64)
            .is_some_and(|v| v >= u64::from(Self::VERSION));
        versioned || object.contains_key("UngroupedItems") || object.contains_key("Folders")
    }

    fn into_latest(mut self) -> WorkspaceDocument {
        self.version = WorkspaceDocument::VERSION;
        self
    }
}
