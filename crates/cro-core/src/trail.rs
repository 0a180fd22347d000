//! JSONL trail operation envelope.
//!
//! Every successful command is recorded as a `TrailOperation` in
//! `{data_dir}/trail.jsonl`. The task store is rebuildable from that file.
//!
//! The `v` field supports schema versioning: trail lines written without a
//! `v` field deserialize with `v == 1` via `#[serde(default)]`.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Outcome, TaskStatus, TrailOp};

/// Current trail format version.
pub const TRAIL_VERSION: u32 = 1;

/// Default trail version for lines without a `v` field.
const fn default_trail_version() -> u32 {
    TRAIL_VERSION
}

/// A single operation recorded in the JSONL trail.
///
/// `data` holds the full task record for `Create` and one of the detail
/// structs below for every other op.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 when absent.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    /// What kind of mutation this represents.
    pub op: TrailOp,

    /// ID of the affected task.
    pub id: String,

    /// Operation payload. Shape depends on `op`.
    pub data: serde_json::Value,
}

/// Payload for `TrailOp::Transition`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TransitionDetail {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Payload for `TrailOp::Complete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompleteDetail {
    pub outcome: Outcome,
    pub completed_on: NaiveDate,
}

/// Payload for `TrailOp::ToggleItem`. `done` is the value after the toggle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ToggleDetail {
    pub label: String,
    pub done: bool,
}

/// Payload for `TrailOp::AttachNote`. An empty `text` clears the note.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NoteDetail {
    pub label: String,
    pub text: String,
}

/// Payload for `TrailOp::AttachPhoto`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PhotoDetail {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
