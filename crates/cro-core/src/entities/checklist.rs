use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named inspection category and its ordered checklist item labels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistCategory {
    pub name: String,
    pub items: Vec<String>,
}

/// Completion state of a single checklist item within a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemState {
    pub label: String,
    pub done: bool,
    pub note: Option<String>,
    pub photo_attached: bool,
    /// Opaque reference supplied by the photo capture collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
}

impl ItemState {
    /// Fresh state: not done, no note, no photo.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done: false,
            note: None,
            photo_attached: false,
            photo_ref: None,
        }
    }
}
