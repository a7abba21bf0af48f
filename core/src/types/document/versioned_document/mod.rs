//! Readers for every on-disk generation of the workspace document.
//!
//! Newest format is attempted first; each older one only when the newer fails.

use super::WorkspaceDocument;
use super::error::DocumentError;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod v1;
pub mod v2;
pub mod v3;

pub trait DocumentVariant: DeserializeOwned {
    const VERSION: u32;

    /// Cheap structural check so that a lenient newer reader does not
    /// swallow an older document as an empty one.
    fn recognizes(value: &Value) -> bool;

    fn into_latest(self) -> WorkspaceDocument;
}

/// Parses any known generation. Blank input is an empty document.
pub fn parse(json: &str) -> Result<WorkspaceDocument, DocumentError> {
    if json.trim().is_empty() {
        return Ok(WorkspaceDocument::default());
    }
    let value: Value = serde_json::from_str(json)?;
    from_value(&value)
}

pub fn from_value(value: &Value) -> Result<WorkspaceDocument, DocumentError> {
    attempt::<v3::Document>(value)
        .or_else(|e| {
            log::debug!("Not a v3 document ({e}), trying v2");
            attempt::<v2::Document>(value)
        })
        .or_else(|e| {
            log::debug!("Not a v2 document ({e}), trying v1");
            attempt::<v1::Document>(value)
        })
        .map_err(|e| {
            log::debug!("Not a v1 document ({e})");
            DocumentError::UnknownFormat
        })
}

fn attempt<V: DocumentVariant>(value: &Value) -> Result<WorkspaceDocument, DocumentError> {
    if !V::recognizes(value) {
        return Err(DocumentError::Unrecognized(V::VERSION));
    }
    let document = V::deserialize(value)?;
    Ok(document.into_latest())
}
