//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to a single `trail.jsonl` file. Uses
//! `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use cro_core::trail::TrailOperation;
use parking_lot::Mutex;

use crate::error::StoreError;

/// Appends trail operations to the journal file.
///
/// Every command in `FieldService` calls `append()` while it holds the task
/// lock, before the change is applied in memory. Appends from different tasks
/// are serialized so lines never interleave.
pub struct TrailWriter {
    path: PathBuf,
    enabled: bool,
    append_lock: Mutex<()>,
}

impl TrailWriter {
    /// Create a writer for the given journal file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        Ok(Self {
            path,
            enabled: true,
            append_lock: Mutex::new(()),
        })
    }

    /// Create a disabled writer (for tests or in-memory use).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            enabled: false,
            append_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one operation as a JSON line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }

        let _guard = self.append_lock.lock();
        serde_jsonlines::append_json_lines(&self.path, [op])
            .map_err(|e| StoreError::io(&self.path, e))?;
        tracing::trace!(op = %op.op, id = %op.id, "trail append");
        Ok(())
    }

    /// The journal file. Empty for a disabled writer.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cro_core::enums::TrailOp;
    use pretty_assertions::assert_eq;

    fn op(id: &str) -> TrailOperation {
        TrailOperation {
            v: 1,
            ts: "2025-01-03T09:00:00+00:00".into(),
            op: TrailOp::ToggleItem,
            id: id.into(),
            data: serde_json::json!({"label": "Data entry verified", "done": true}),
        }
    }

    #[test]
    fn appends_one_line_per_op() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("trail.jsonl");
        let writer = TrailWriter::new(path.clone()).unwrap();

        writer.append(&op("tsk-00000001")).unwrap();
        writer.append(&op("tsk-00000002")).unwrap();

        let ops: Vec<TrailOperation> = serde_jsonlines::json_lines(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(ops, vec![op("tsk-00000001"), op("tsk-00000002")]);
    }

    #[test]
    fn disabled_writer_is_noop() {
        let writer = TrailWriter::disabled();
        assert!(!writer.is_enabled());
        writer.append(&op("tsk-00000001")).unwrap();
        assert_eq!(writer.path(), Path::new(""));
    }

    #[test]
    fn append_into_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trail.jsonl");
        let writer = TrailWriter::new(path.clone()).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = writer.append(&op("tsk-00000001")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
