//! In-memory task store: commands, queries, and the freeze rule.
//!
//! Each task sits behind its own mutex, held for the whole of a command, so
//! commands on one task are serialized while commands on different tasks run
//! independently. The table lock is only taken for writing by intake.
//! A command builds its change on a copy of the task and only stores the copy
//! once its commit hook succeeds, so the service can journal under the lock.
//! Queries clone each task under its mutex and never observe a half-applied
//! command.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use cro_core::entities::{ItemState, NewTask, Notification, Task};
use cro_core::enums::{Horizon, HorizonPolicy, Outcome, TaskStatus};
use cro_core::errors::CoreError;
use cro_core::ids::{PREFIX_TASK, generate_id};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::catalog::ChecklistCatalog;
use crate::clock::{Clock, SystemClock};
use crate::horizon::classify;
use crate::rules::{NotificationRule, default_rules};

type TaskCell = Arc<Mutex<Task>>;

#[derive(Default)]
struct TaskTable {
    /// Insertion order.
    order: Vec<TaskCell>,
    index: HashMap<String, TaskCell>,
}

/// Outcome of a successful `set_status` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: TaskStatus,
    pub task: Task,
}

/// Owner of every task record and its checklist item states.
pub struct TaskStore {
    catalog: Arc<ChecklistCatalog>,
    clock: Arc<dyn Clock>,
    policy: HorizonPolicy,
    rules: RwLock<Vec<Arc<dyn NotificationRule>>>,
    table: RwLock<TaskTable>,
}

/// Builder for [`TaskStore`].
pub struct TaskStoreBuilder {
    catalog: Arc<ChecklistCatalog>,
    clock: Arc<dyn Clock>,
    policy: HorizonPolicy,
    rules: Option<Vec<Arc<dyn NotificationRule>>>,
}

impl TaskStoreBuilder {
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: HorizonPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the built-in rules.
    #[must_use]
    pub fn rules(mut self, rules: Vec<Arc<dyn NotificationRule>>) -> Self {
        self.rules = Some(rules);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskStore {
        let rules = self
            .rules
            .unwrap_or_else(|| default_rules(&cro_config::NotificationConfig::default()));
        TaskStore {
            catalog: self.catalog,
            clock: self.clock,
            policy: self.policy,
            rules: RwLock::new(rules),
            table: RwLock::new(TaskTable::default()),
        }
    }
}

impl TaskStore {
    /// Store with the system clock, assigned horizons, and the built-in rules.
    #[must_use]
    pub fn new(catalog: Arc<ChecklistCatalog>) -> Self {
        Self::builder(catalog).build()
    }

    #[must_use]
    pub fn builder(catalog: Arc<ChecklistCatalog>) -> TaskStoreBuilder {
        TaskStoreBuilder {
            catalog,
            clock: Arc::new(SystemClock),
            policy: HorizonPolicy::default(),
            rules: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ChecklistCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn policy(&self) -> HorizonPolicy {
        self.policy
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Add a notification rule. It runs after every rule registered before it.
    pub fn register_rule(&self, rule: Arc<dyn NotificationRule>) {
        self.rules.write().push(rule);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Catalog queries
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn list_categories(&self) -> Vec<&str> {
        self.catalog.list_categories()
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unregistered category.
    pub fn items_for(&self, category: &str) -> Result<&[String], CoreError> {
        self.catalog.items_for(category)
    }

    // -----------------------------------------------------------------------
    // Intake
    // -----------------------------------------------------------------------

    /// Create a task from an intake record.
    ///
    /// Item states are initialized from the catalog: not done, no note, no
    /// photo. A record arriving already `completed` must carry an outcome and
    /// is frozen from the start; its completion date is its scheduled date.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidArgument` for blank site/activity type, a blank or
    ///   duplicate id, or an outcome that disagrees with the status.
    /// - `CoreError::NotFound` if the checklist category is not registered.
    pub fn insert_task(&self, record: NewTask) -> Result<Task, CoreError> {
        self.insert_task_at(record, self.clock.now(), unhooked)
    }

    pub(crate) fn insert_task_at<E: From<CoreError>>(
        &self,
        record: NewTask,
        now: DateTime<Utc>,
        commit: impl FnOnce(&Task) -> Result<(), E>,
    ) -> Result<Task, E> {
        if record.site.trim().is_empty() {
            return Err(CoreError::InvalidArgument("site must not be blank".into()).into());
        }
        if record.activity_type.trim().is_empty() {
            return Err(
                CoreError::InvalidArgument("activity type must not be blank".into()).into(),
            );
        }
        check_outcome(record.status, record.outcome)?;

        let item_states = match record.checklist_category.as_deref() {
            Some(category) => self
                .catalog
                .items_for(category)?
                .iter()
                .map(ItemState::new)
                .collect(),
            None => Vec::new(),
        };

        let mut table = self.table.write();
        let id = match record.id {
            Some(id) => {
                if id.trim().is_empty() {
                    return Err(
                        CoreError::InvalidArgument("task id must not be blank".into()).into(),
                    );
                }
                if table.index.contains_key(&id) {
                    return Err(
                        CoreError::InvalidArgument(format!("duplicate task id '{id}'")).into(),
                    );
                }
                id
            }
            None => loop {
                let candidate = generate_id(PREFIX_TASK)?;
                if !table.index.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        let completed_on = record
            .status
            .is_terminal()
            .then_some(record.scheduled_date);
        let task = Task {
            id,
            site: record.site,
            activity_type: record.activity_type,
            scheduled_date: record.scheduled_date,
            status: record.status,
            priority: record.priority,
            outcome: record.outcome,
            horizon: record.horizon,
            checklist_category: record.checklist_category,
            item_states,
            completed_on,
            created_at: now,
            updated_at: now,
        };
        commit(&task)?;
        push(&mut table, task.clone());
        Ok(task)
    }

    /// Insert a full task record as persisted in the trail.
    pub(crate) fn restore_task(&self, task: Task) -> Result<(), CoreError> {
        check_outcome(task.status, task.outcome)?;
        if let Some(category) = task.checklist_category.as_deref() {
            if !self.catalog.contains(category) {
                return Err(CoreError::category_not_found(category));
            }
        }
        let mut table = self.table.write();
        if table.index.contains_key(&task.id) {
            return Err(CoreError::InvalidArgument(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
        push(&mut table, task);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commands
    //
    // The crate-private `*_at` variants take a `commit` hook. It runs under
    // the task lock after every check has passed and before the change is
    // applied; an error from it aborts the command with the task untouched.
    // -----------------------------------------------------------------------

    /// Move a task between non-terminal states.
    ///
    /// Setting the current status again is a no-op.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` for an unknown task.
    /// - `CoreError::InvalidTransition` if the task is completed, the target
    ///   is `completed` (use [`Self::mark_complete`]), or the target is
    ///   `not_started`.
    pub fn set_status(&self, task_id: &str, to: TaskStatus) -> Result<Transition, CoreError> {
        self.set_status_at(task_id, to, self.clock.now(), unhooked)
    }

    /// The hook also sees no-op transitions, where `from` equals the
    /// resulting status.
    pub(crate) fn set_status_at<E: From<CoreError>>(
        &self,
        task_id: &str,
        to: TaskStatus,
        now: DateTime<Utc>,
        commit: impl FnOnce(&Transition) -> Result<(), E>,
    ) -> Result<Transition, E> {
        let cell = self.cell(task_id)?;
        let mut task = cell.lock();
        let from = task.status;

        if from == to && !from.is_terminal() {
            let transition = Transition {
                from,
                task: task.clone(),
            };
            commit(&transition)?;
            return Ok(transition);
        }
        if to.is_terminal() || !from.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                id: task_id.to_string(),
                from,
                to,
            }
            .into());
        }

        let mut next = task.clone();
        next.status = to;
        next.updated_at = now;
        let transition = Transition { from, task: next };
        commit(&transition)?;
        *task = transition.task.clone();
        Ok(transition)
    }

    /// Complete a task with an outcome and freeze its checklist.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` for an unknown task.
    /// - `CoreError::AlreadyCompleted` if the task is already terminal.
    pub fn mark_complete(&self, task_id: &str, outcome: Outcome) -> Result<Task, CoreError> {
        let now = self.clock.now();
        self.complete_at(task_id, outcome, now.date_naive(), now, unhooked)
    }

    pub(crate) fn complete_at<E: From<CoreError>>(
        &self,
        task_id: &str,
        outcome: Outcome,
        completed_on: NaiveDate,
        now: DateTime<Utc>,
        commit: impl FnOnce(&Task) -> Result<(), E>,
    ) -> Result<Task, E> {
        let cell = self.cell(task_id)?;
        let mut task = cell.lock();
        if task.is_frozen() {
            return Err(CoreError::AlreadyCompleted {
                id: task_id.to_string(),
            }
            .into());
        }

        let mut next = task.clone();
        next.status = TaskStatus::Completed;
        next.outcome = Some(outcome);
        next.completed_on = Some(completed_on);
        next.updated_at = now;
        commit(&next)?;
        *task = next.clone();
        Ok(next)
    }

    /// Flip the `done` flag of a checklist item. Task status is untouched.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` for an unknown task or item.
    /// - `CoreError::TaskFrozen` if the task is completed.
    pub fn toggle_item(&self, task_id: &str, label: &str) -> Result<ItemState, CoreError> {
        self.toggle_item_at(task_id, label, self.clock.now(), unhooked)
    }

    pub(crate) fn toggle_item_at<E: From<CoreError>>(
        &self,
        task_id: &str,
        label: &str,
        now: DateTime<Utc>,
        commit: impl FnOnce(&ItemState) -> Result<(), E>,
    ) -> Result<ItemState, E> {
        self.update_item(task_id, label, now, |item| item.done = !item.done, commit)
    }

    /// Set or overwrite the note on a checklist item. Empty text clears it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle_item`].
    pub fn attach_note(
        &self,
        task_id: &str,
        label: &str,
        text: &str,
    ) -> Result<ItemState, CoreError> {
        self.attach_note_at(task_id, label, text, self.clock.now(), unhooked)
    }

    pub(crate) fn attach_note_at<E: From<CoreError>>(
        &self,
        task_id: &str,
        label: &str,
        text: &str,
        now: DateTime<Utc>,
        commit: impl FnOnce(&ItemState) -> Result<(), E>,
    ) -> Result<ItemState, E> {
        self.update_item(
            task_id,
            label,
            now,
            |item| item.note = (!text.is_empty()).then(|| text.to_string()),
            commit,
        )
    }

    /// Record that a photo was captured for a checklist item.
    ///
    /// Idempotent. A supplied `reference` replaces any earlier one; `None`
    /// keeps it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle_item`].
    pub fn attach_photo(
        &self,
        task_id: &str,
        label: &str,
        reference: Option<&str>,
    ) -> Result<ItemState, CoreError> {
        self.attach_photo_at(task_id, label, reference, self.clock.now(), unhooked)
    }

    pub(crate) fn attach_photo_at<E: From<CoreError>>(
        &self,
        task_id: &str,
        label: &str,
        reference: Option<&str>,
        now: DateTime<Utc>,
        commit: impl FnOnce(&ItemState) -> Result<(), E>,
    ) -> Result<ItemState, E> {
        self.update_item(
            task_id,
            label,
            now,
            |item| {
                item.photo_attached = true;
                if let Some(reference) = reference {
                    item.photo_ref = Some(reference.to_string());
                }
            },
            commit,
        )
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Snapshot of one task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown task.
    pub fn get_task(&self, task_id: &str) -> Result<Task, CoreError> {
        Ok(self.cell(task_id)?.lock().clone())
    }

    /// Every task in insertion order.
    #[must_use]
    pub fn list_tasks(&self) -> Vec<Task> {
        self.table
            .read()
            .order
            .iter()
            .map(|cell| cell.lock().clone())
            .collect()
    }

    /// Tasks in one horizon, in insertion order.
    #[must_use]
    pub fn tasks_by_horizon(&self, horizon: Horizon) -> Vec<Task> {
        let today = self.clock.today();
        self.list_tasks()
            .into_iter()
            .filter(|task| classify(task, self.policy, today) == horizon)
            .collect()
    }

    /// Tasks tracking the given checklist category, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unregistered category.
    pub fn tasks_by_category(&self, category: &str) -> Result<Vec<Task>, CoreError> {
        if !self.catalog.contains(category) {
            return Err(CoreError::category_not_found(category));
        }
        Ok(self
            .list_tasks()
            .into_iter()
            .filter(|task| task.checklist_category.as_deref() == Some(category))
            .collect())
    }

    /// Evaluate every registered rule against the current tasks.
    ///
    /// Ordered by rule registration, then task insertion.
    #[must_use]
    pub fn urgent_notifications(&self) -> Vec<Notification> {
        let tasks = self.list_tasks();
        let today = self.clock.today();
        self.rules
            .read()
            .iter()
            .flat_map(|rule| rule.evaluate(&tasks, today))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn cell(&self, task_id: &str) -> Result<TaskCell, CoreError> {
        self.table
            .read()
            .index
            .get(task_id)
            .cloned()
            .ok_or_else(|| CoreError::task_not_found(task_id))
    }

    /// Run `apply` on a copy of one item of an open task, then `commit`, then
    /// store the copy. Nothing changes on error.
    fn update_item<E: From<CoreError>>(
        &self,
        task_id: &str,
        label: &str,
        now: DateTime<Utc>,
        apply: impl FnOnce(&mut ItemState),
        commit: impl FnOnce(&ItemState) -> Result<(), E>,
    ) -> Result<ItemState, E> {
        let cell = self.cell(task_id)?;
        let mut task = cell.lock();
        if task.is_frozen() {
            return Err(CoreError::TaskFrozen {
                id: task_id.to_string(),
            }
            .into());
        }

        let mut updated = task
            .item(label)
            .cloned()
            .ok_or_else(|| CoreError::item_not_found(task_id, label))?;
        apply(&mut updated);
        commit(&updated)?;

        if let Some(item) = task.item_mut(label) {
            *item = updated.clone();
        }
        task.updated_at = now;
        Ok(updated)
    }
}

fn push(table: &mut TaskTable, task: Task) {
    let id = task.id.clone();
    let cell = Arc::new(Mutex::new(task));
    table.order.push(Arc::clone(&cell));
    table.index.insert(id, cell);
}

/// Commit hook for commands that are not journaled.
#[allow(clippy::unnecessary_wraps)]
const fn unhooked<T>(_: &T) -> Result<(), CoreError> {
    Ok(())
}

/// An outcome is present exactly when the status is `completed`.
fn check_outcome(status: TaskStatus, outcome: Option<Outcome>) -> Result<(), CoreError> {
    match (status.is_terminal(), outcome) {
        (true, None) => Err(CoreError::InvalidArgument(
            "a completed task requires an outcome".into(),
        )),
        (false, Some(outcome)) => Err(CoreError::InvalidArgument(format!(
            "outcome '{outcome}' given for a task with status '{status}'"
        ))),
        _ => Ok(()),
    }
}
