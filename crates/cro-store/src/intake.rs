//! Task intake from JSONL files of `NewTask` records.

use std::path::Path;

use cro_core::entities::NewTask;

use crate::error::StoreError;

/// Read every intake record in `path`.
///
/// The whole file is parsed before anything is returned, so a malformed line
/// means no record is imported.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read or a line does not
/// parse as a `NewTask`.
pub fn read_records(path: &Path) -> Result<Vec<NewTask>, StoreError> {
    let records = serde_jsonlines::json_lines::<NewTask, _>(path)
        .map_err(|e| StoreError::io(path, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::io(path, e))?;
    tracing::debug!(path = %path.display(), records = records.len(), "read intake file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cro_core::enums::{Horizon, Priority, TaskStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_records_with_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"site":"NYC Medical","activity_type":"Protocol Review","scheduled_date":"2025-01-05","horizon":"upcoming"}"#,
                "\n",
                r#"{"id":"tsk-1a000004","site":"LA Research","activity_type":"Deviation Assessment","scheduled_date":"2025-01-07","horizon":"upcoming","priority":"low","checklist_category":"Protocol Deviations"}"#,
                "\n",
            ),
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, TaskStatus::NotStarted);
        assert_eq!(records[0].priority, Priority::Medium);
        assert_eq!(records[1].id.as_deref(), Some("tsk-1a000004"));
        assert_eq!(records[1].horizon, Horizon::Upcoming);
    }

    #[test]
    fn malformed_line_fails_whole_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"site":"NYC Medical","activity_type":"Protocol Review","scheduled_date":"2025-01-05","horizon":"upcoming"}"#,
                "\n",
                r#"{"site":"Denver","activity_type":"Site Inspection","scheduled_date":"2025-01-05","horizon":"someday"}"#,
                "\n",
            ),
        )
        .unwrap();

        assert!(matches!(read_records(&path), Err(StoreError::Io { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            read_records(&dir.path().join("absent.jsonl")),
            Err(StoreError::Io { .. })
        ));
    }
}
