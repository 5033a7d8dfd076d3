//! JSON codec for the persisted item list.
//!
//! The stored document is a single JSON array:
//!
//! ```json
//! [{ "id": "aB3dE6gH9k", "title": "Ship it", "position": { "x": 120.0, "y": 80.0 } }]
//! ```
//!
//! There is no version field. A schema change needs a new storage key.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::collections::HashSet;

use crate::board::PriorityItem;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Not JSON, not an array, or an entry is missing a required field.
    #[error("invalid item json: {0}")]
    Json(#[from] serde_json::Error),
    /// An entry has an empty id.
    #[error("item at index {index} has an empty id")]
    EmptyId { index: usize },
    /// An entry has an empty title.
    #[error("item {id} has an empty title")]
    EmptyTitle { id: String },
    /// Two entries share an id.
    #[error("item id {0} appears more than once")]
    DuplicateId(String),
}

/// Serialize `items` as a JSON array.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode(items: &[PriorityItem]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(items)?)
}

/// Parse a JSON array produced by [`encode`].
///
/// Either every entry is valid and the whole list is returned, or nothing is.
///
/// # Errors
///
/// Returns [`CodecError`] for unparseable JSON, missing fields, empty ids or
/// titles, and repeated ids.
pub fn decode(raw: &str) -> Result<Vec<PriorityItem>, CodecError> {
    let items: Vec<PriorityItem> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.id.is_empty() {
            return Err(CodecError::EmptyId { index });
        }
        if item.title.trim().is_empty() {
            return Err(CodecError::EmptyTitle { id: item.id.clone() });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(CodecError::DuplicateId(item.id.clone()));
        }
    }

    Ok(items)
}
