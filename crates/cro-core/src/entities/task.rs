use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ItemState;
use crate::enums::{Horizon, Outcome, Priority, TaskStatus};

/// One site activity assigned to a field agent.
///
/// `outcome` is `Some` exactly when `status` is `Completed`. Once completed,
/// `item_states` no longer change.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub site: String,
    /// Open tag such as "Site Inspection" or "Deviation Assessment".
    pub activity_type: String,
    pub scheduled_date: NaiveDate,
    pub status: TaskStatus,
    pub priority: Priority,
    pub outcome: Option<Outcome>,
    pub horizon: Horizon,
    pub checklist_category: Option<String>,
    #[serde(default)]
    pub item_states: Vec<ItemState>,
    pub completed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// State of the checklist item with the given label.
    #[must_use]
    pub fn item(&self, label: &str) -> Option<&ItemState> {
        self.item_states.iter().find(|item| item.label == label)
    }

    pub fn item_mut(&mut self, label: &str) -> Option<&mut ItemState> {
        self.item_states.iter_mut().find(|item| item.label == label)
    }

    /// Completed tasks reject every further mutation.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of checklist items marked done.
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.item_states.iter().filter(|item| item.done).count()
    }
}

/// Intake record for a task created by an external process.
///
/// `status` defaults to `not_started` and `priority` to `medium`. A record
/// with `status = completed` must carry an `outcome`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTask {
    /// Caller-chosen ID. Generated (`tsk-xxxxxxxx`) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub site: String,
    pub activity_type: String,
    pub scheduled_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    pub horizon: Horizon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

const fn default_status() -> TaskStatus {
    TaskStatus::NotStarted
}

impl NewTask {
    /// Minimal intake record; remaining fields take their defaults.
    #[must_use]
    pub fn new(
        site: impl Into<String>,
        activity_type: impl Into<String>,
        scheduled_date: NaiveDate,
        horizon: Horizon,
    ) -> Self {
        Self {
            id: None,
            site: site.into(),
            activity_type: activity_type.into(),
            scheduled_date,
            status: default_status(),
            priority: Priority::default(),
            horizon,
            checklist_category: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.checklist_category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}
