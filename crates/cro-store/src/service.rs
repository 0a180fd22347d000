//! Service layer journaling store commands to the JSONL trail.
//!
//! `FieldService` wraps `TaskStore` (in-memory state) and `TrailWriter`
//! (JSONL persistence). Every command follows this protocol, under the task's
//! lock:
//! 1. Check the store command at one timestamp taken from the store's clock
//! 2. Append the matching trail operation at that timestamp
//! 3. Only if the append succeeded, apply the change in memory
//!
//! Queries go straight to the store via [`FieldService::store`].

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cro_config::CroConfig;
use cro_core::entities::{ItemState, NewTask, Task};
use cro_core::enums::{Outcome, TaskStatus, TrailOp};
use cro_core::trail::{
    CompleteDetail, NoteDetail, PhotoDetail, TRAIL_VERSION, ToggleDetail, TrailOperation,
    TransitionDetail,
};
use serde::Serialize;

use crate::catalog::ChecklistCatalog;
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::intake;
use crate::rules::default_rules;
use crate::store::{TaskStore, Transition};
use crate::trail::{ReplaySummary, TrailReplayer, TrailWriter};

pub struct FieldService {
    store: TaskStore,
    trail: TrailWriter,
}

impl FieldService {
    /// Open the store described by `config` and replay its trail.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the catalog cannot be loaded, the data
    /// directory cannot be created, or the trail does not replay cleanly.
    pub fn open(config: &CroConfig) -> Result<Self, StoreError> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    /// [`Self::open`] with an injected clock.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open`].
    pub fn open_with_clock(config: &CroConfig, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let catalog = match config.storage.catalog_path() {
            Some(path) => ChecklistCatalog::load(&path)?,
            None => ChecklistCatalog::builtin(),
        };
        let store = TaskStore::builder(Arc::new(catalog))
            .clock(clock)
            .policy(config.horizon.policy)
            .rules(default_rules(&config.notifications))
            .build();

        let trail_path = config.storage.trail_path();
        let summary = TrailReplayer::replay(&store, &trail_path)?;
        tracing::debug!(
            tasks = store.len(),
            operations = summary.operations_replayed,
            "field store opened"
        );
        Ok(Self::new(store, TrailWriter::new(trail_path)?))
    }

    /// Wrap an existing store. Pass `TrailWriter::disabled()` to skip
    /// journaling.
    #[must_use]
    pub const fn new(store: TaskStore, trail: TrailWriter) -> Self {
        Self { store, trail }
    }

    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Replay a trail file into this service's store without re-journaling.
    ///
    /// # Errors
    ///
    /// See [`TrailReplayer::replay`].
    pub fn replay(&self, path: &Path) -> Result<ReplaySummary, StoreError> {
        TrailReplayer::replay(&self.store, path)
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Create a task and journal a `create` op carrying the full record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if the record is rejected and
    /// `StoreError::Io` if the trail append fails.
    pub fn insert_task(&self, record: NewTask) -> Result<Task, StoreError> {
        let now = self.store.now();
        self.store.insert_task_at(record, now, |task| {
            self.journal(TrailOp::Create, &task.id, now, task)
        })
    }

    /// Import every record of a JSONL intake file, in file order.
    ///
    /// Stops at the first rejected record. Records before it stay imported.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the file cannot be read or parsed, or if the
    ///   trail append fails.
    /// - `StoreError::Intake` naming the line of the rejected record.
    pub fn import(&self, path: &Path) -> Result<Vec<Task>, StoreError> {
        let records = intake::read_records(path)?;
        let mut imported = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let task = self.insert_task(record).map_err(|err| match err {
                StoreError::Core(source) => StoreError::Intake {
                    line: index + 1,
                    source,
                },
                other => other,
            })?;
            imported.push(task);
        }
        tracing::info!(path = %path.display(), tasks = imported.len(), "intake imported");
        Ok(imported)
    }

    /// Setting the current status again is not journaled.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::set_status`]; also `StoreError::Io` on journal failure.
    pub fn set_status(&self, task_id: &str, to: TaskStatus) -> Result<Transition, StoreError> {
        let now = self.store.now();
        self.store.set_status_at(task_id, to, now, |transition| {
            if transition.from == to {
                return Ok(());
            }
            self.journal(
                TrailOp::Transition,
                task_id,
                now,
                &TransitionDetail {
                    from: transition.from,
                    to,
                },
            )
        })
    }

    /// # Errors
    ///
    /// See [`TaskStore::mark_complete`]; also `StoreError::Io` on journal
    /// failure.
    pub fn mark_complete(&self, task_id: &str, outcome: Outcome) -> Result<Task, StoreError> {
        let now = self.store.now();
        let completed_on = now.date_naive();
        self.store
            .complete_at(task_id, outcome, completed_on, now, |_| {
                self.journal(
                    TrailOp::Complete,
                    task_id,
                    now,
                    &CompleteDetail {
                        outcome,
                        completed_on,
                    },
                )
            })
    }

    /// # Errors
    ///
    /// See [`TaskStore::toggle_item`]; also `StoreError::Io` on journal failure.
    pub fn toggle_item(&self, task_id: &str, label: &str) -> Result<ItemState, StoreError> {
        let now = self.store.now();
        self.store.toggle_item_at(task_id, label, now, |item| {
            self.journal(
                TrailOp::ToggleItem,
                task_id,
                now,
                &ToggleDetail {
                    label: label.to_string(),
                    done: item.done,
                },
            )
        })
    }

    /// # Errors
    ///
    /// See [`TaskStore::attach_note`]; also `StoreError::Io` on journal failure.
    pub fn attach_note(
        &self,
        task_id: &str,
        label: &str,
        text: &str,
    ) -> Result<ItemState, StoreError> {
        let now = self.store.now();
        self.store.attach_note_at(task_id, label, text, now, |_| {
            self.journal(
                TrailOp::AttachNote,
                task_id,
                now,
                &NoteDetail {
                    label: label.to_string(),
                    text: text.to_string(),
                },
            )
        })
    }

    /// # Errors
    ///
    /// See [`TaskStore::attach_photo`]; also `StoreError::Io` on journal
    /// failure.
    pub fn attach_photo(
        &self,
        task_id: &str,
        label: &str,
        reference: Option<&str>,
    ) -> Result<ItemState, StoreError> {
        let now = self.store.now();
        self.store.attach_photo_at(task_id, label, reference, now, |_| {
            self.journal(
                TrailOp::AttachPhoto,
                task_id,
                now,
                &PhotoDetail {
                    label: label.to_string(),
                    reference: reference.map(ToString::to_string),
                },
            )
        })
    }

    fn journal(
        &self,
        op: TrailOp,
        id: &str,
        ts: DateTime<Utc>,
        data: &impl Serialize,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(data).map_err(|source| StoreError::Payload {
            op,
            id: id.to_string(),
            source,
        })?;
        self.trail
            .append(&TrailOperation {
                v: TRAIL_VERSION,
                ts: ts.to_rfc3339(),
                op,
                id: id.to_string(),
                data,
            })
            .inspect_err(|e| tracing::error!(%op, id, error = %e, "trail append failed"))
    }
}
