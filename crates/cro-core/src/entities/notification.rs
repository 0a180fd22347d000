use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// An advisory message produced by a notification rule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    /// Name of the rule that produced this notification.
    pub rule: String,
    pub severity: Severity,
    pub task_id: String,
    pub site: String,
    pub message: String,
}
