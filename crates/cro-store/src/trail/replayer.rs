//! Rebuild a task store from its JSONL trail.
//!
//! Ops are applied in file order through the store's own commands, so the
//! outcome and freeze rules are re-checked on every line. Each op runs at the
//! timestamp it was recorded with. Toggles and transitions are checked
//! against the recorded state before they are applied.

use std::path::Path;

use chrono::{DateTime, Utc};
use cro_core::entities::Task;
use cro_core::enums::TrailOp;
use cro_core::trail::{
    CompleteDetail, NoteDetail, PhotoDetail, TRAIL_VERSION, ToggleDetail, TrailOperation,
    TransitionDetail,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::store::TaskStore;

/// Counts reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub operations_replayed: u32,
    pub tasks_created: u32,
    pub duration_ms: u64,
}

pub struct TrailReplayer;

impl TrailReplayer {
    /// Apply every op in `path` to `store`. A missing file replays nothing.
    ///
    /// Stops at the first op that fails; ops before it stay applied.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the file cannot be read or a line is not JSON.
    /// - `StoreError::UnsupportedVersion` for a line with `v != 1`.
    /// - `StoreError::Payload` / `StoreError::Timestamp` for malformed lines.
    /// - `StoreError::Core` if a command rejects the op.
    /// - `StoreError::Diverged` if a toggle or transition lands in a different
    ///   state than was recorded.
    pub fn replay(store: &TaskStore, path: &Path) -> Result<ReplaySummary, StoreError> {
        let start = std::time::Instant::now();
        let mut summary = ReplaySummary::default();

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no trail to replay");
            return Ok(summary);
        }

        let lines = serde_jsonlines::json_lines::<TrailOperation, _>(path)
            .map_err(|e| StoreError::io(path, e))?;
        for line in lines {
            let op = line.map_err(|e| StoreError::io(path, e))?;
            if op.v != TRAIL_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    version: op.v,
                    id: op.id,
                });
            }

            replay_operation(store, &op)?;
            summary.operations_replayed += 1;
            if op.op == TrailOp::Create {
                summary.tasks_created += 1;
            }
        }

        summary.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            path = %path.display(),
            operations = summary.operations_replayed,
            tasks = summary.tasks_created,
            "trail replayed"
        );
        Ok(summary)
    }
}

fn detail<T: DeserializeOwned>(op: &TrailOperation) -> Result<T, StoreError> {
    serde_json::from_value(op.data.clone()).map_err(|source| StoreError::Payload {
        op: op.op,
        id: op.id.clone(),
        source,
    })
}

fn timestamp(op: &TrailOperation) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(&op.ts)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| StoreError::Timestamp {
            id: op.id.clone(),
            ts: op.ts.clone(),
            source,
        })
}

fn diverged(op: &TrailOperation, reason: String) -> StoreError {
    StoreError::Diverged {
        op: op.op,
        id: op.id.clone(),
        reason,
    }
}

/// Commit hook for replayed ops that carry nothing to cross-check.
#[allow(clippy::unnecessary_wraps)]
const fn applied<T>(_: &T) -> Result<(), StoreError> {
    Ok(())
}

fn replay_operation(store: &TaskStore, op: &TrailOperation) -> Result<(), StoreError> {
    let ts = timestamp(op)?;
    match op.op {
        TrailOp::Create => {
            let task: Task = detail(op)?;
            if task.id != op.id {
                return Err(diverged(op, format!("payload carries id {}", task.id)));
            }
            store.restore_task(task)?;
        }
        TrailOp::Transition => {
            let d: TransitionDetail = detail(op)?;
            store.set_status_at(&op.id, d.to, ts, |transition| {
                if transition.from == d.from {
                    Ok(())
                } else {
                    Err(diverged(
                        op,
                        format!("expected status {}, found {}", d.from, transition.from),
                    ))
                }
            })?;
        }
        TrailOp::Complete => {
            let d: CompleteDetail = detail(op)?;
            store.complete_at(&op.id, d.outcome, d.completed_on, ts, applied)?;
        }
        TrailOp::ToggleItem => {
            let d: ToggleDetail = detail(op)?;
            store.toggle_item_at(&op.id, &d.label, ts, |item| {
                if item.done == d.done {
                    Ok(())
                } else {
                    Err(diverged(
                        op,
                        format!("item '{}' toggled to done={}", d.label, item.done),
                    ))
                }
            })?;
        }
        TrailOp::AttachNote => {
            let d: NoteDetail = detail(op)?;
            store.attach_note_at(&op.id, &d.label, &d.text, ts, applied)?;
        }
        TrailOp::AttachPhoto => {
            let d: PhotoDetail = detail(op)?;
            store.attach_photo_at(&op.id, &d.label, d.reference.as_deref(), ts, applied)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;
    use crate::catalog::ChecklistCatalog;
    use crate::clock::FixedClock;
    use crate::test_support::{BOSTON, TEMP_LOGS, sample_store, today};
    use cro_core::enums::{Outcome, TaskStatus};
    use pretty_assertions::assert_eq;

    fn empty_store() -> TaskStore {
        TaskStore::builder(Arc::new(ChecklistCatalog::builtin()))
            .clock(Arc::new(FixedClock::at_date(today())))
            .build()
    }

    fn write_lines(path: &Path, lines: &[serde_json::Value]) {
        let mut file = std::fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    fn create_line(task: &Task) -> serde_json::Value {
        serde_json::json!({
            "v": 1,
            "ts": "2025-01-03T08:00:00+00:00",
            "op": "create",
            "id": task.id,
            "data": task,
        })
    }

    #[test]
    fn missing_file_replays_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = empty_store();
        let summary = TrailReplayer::replay(&store, &dir.path().join("trail.jsonl")).unwrap();
        assert_eq!(summary.operations_replayed, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn replays_create_toggle_complete() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let boston = sample_store().get_task(BOSTON).unwrap();
        write_lines(
            &path,
            &[
                create_line(&boston),
                serde_json::json!({"v":1,"ts":"2025-01-03T09:00:00+00:00","op":"toggle_item","id":BOSTON,"data":{"label":TEMP_LOGS,"done":true}}),
                serde_json::json!({"v":1,"ts":"2025-01-03T09:05:00+00:00","op":"attach_note","id":BOSTON,"data":{"label":TEMP_LOGS,"text":"Freezer 2 gap"}}),
                serde_json::json!({"v":1,"ts":"2025-01-03T10:00:00+00:00","op":"complete","id":BOSTON,"data":{"outcome":"passed","completed_on":"2025-01-03"}}),
            ],
        );

        let store = empty_store();
        let summary = TrailReplayer::replay(&store, &path).unwrap();
        assert_eq!(summary.operations_replayed, 4);
        assert_eq!(summary.tasks_created, 1);

        let task = store.get_task(BOSTON).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.outcome, Some(Outcome::Passed));
        let item = task.item(TEMP_LOGS).unwrap();
        assert!(item.done);
        assert_eq!(item.note.as_deref(), Some("Freezer 2 gap"));
        assert_eq!(task.updated_at.to_rfc3339(), "2025-01-03T10:00:00+00:00");
    }

    #[test]
    fn rejects_future_version() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let boston = sample_store().get_task(BOSTON).unwrap();
        let mut line = create_line(&boston);
        line["v"] = serde_json::json!(2);
        write_lines(&path, &[line]);

        let err = TrailReplayer::replay(&empty_store(), &path).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { version: 2, .. }));
    }

    #[test]
    fn toggle_mismatch_diverges() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let boston = sample_store().get_task(BOSTON).unwrap();
        write_lines(
            &path,
            &[
                create_line(&boston),
                serde_json::json!({"v":1,"ts":"2025-01-03T09:00:00+00:00","op":"toggle_item","id":BOSTON,"data":{"label":TEMP_LOGS,"done":false}}),
            ],
        );

        let err = TrailReplayer::replay(&empty_store(), &path).unwrap_err();
        assert!(matches!(err, StoreError::Diverged { op: TrailOp::ToggleItem, .. }));
    }

    #[test]
    fn mutation_after_complete_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let boston = sample_store().get_task(BOSTON).unwrap();
        write_lines(
            &path,
            &[
                create_line(&boston),
                serde_json::json!({"v":1,"ts":"2025-01-03T10:00:00+00:00","op":"complete","id":BOSTON,"data":{"outcome":"issues_found","completed_on":"2025-01-03"}}),
                serde_json::json!({"v":1,"ts":"2025-01-03T11:00:00+00:00","op":"toggle_item","id":BOSTON,"data":{"label":TEMP_LOGS,"done":true}}),
            ],
        );

        let err = TrailReplayer::replay(&empty_store(), &path).unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(cro_core::errors::CoreError::TaskFrozen { .. })
        ));
    }

    #[test]
    fn malformed_payload_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        write_lines(
            &path,
            &[serde_json::json!({"v":1,"ts":"2025-01-03T09:00:00+00:00","op":"complete","id":BOSTON,"data":{"outcome":"maybe"}})],
        );

        let err = TrailReplayer::replay(&empty_store(), &path).unwrap_err();
        assert!(matches!(err, StoreError::Payload { op: TrailOp::Complete, .. }));
    }

    #[test]
    fn transition_from_mismatch_diverges_before_applying() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let boston = sample_store().get_task(BOSTON).unwrap();
        write_lines(
            &path,
            &[
                create_line(&boston),
                serde_json::json!({"v":1,"ts":"2025-01-03T09:00:00+00:00","op":"transition","id":BOSTON,"data":{"from":"pending","to":"started"}}),
            ],
        );

        let store = empty_store();
        let err = TrailReplayer::replay(&store, &path).unwrap_err();
        assert!(matches!(err, StoreError::Diverged { op: TrailOp::Transition, .. }));
        assert_eq!(store.get_task(BOSTON).unwrap().status, TaskStatus::InProgress);
    }
}
