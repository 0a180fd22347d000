//! Error types for cro-store.

use std::path::PathBuf;

use cro_core::enums::TrailOp;
use cro_core::errors::CoreError;
use thiserror::Error;

/// Errors from the store, its catalog loader, and the trail journal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A state model rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a journal, intake, or catalog file failed.
    #[error("I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid TOML for the catalog layout.
    #[error("Catalog parse failed: {0}")]
    Catalog(#[from] toml::de::Error),

    /// A trail line was written by a newer format version.
    #[error("Unsupported trail version {version} for op on {id}")]
    UnsupportedVersion { version: u32, id: String },

    /// A trail payload does not match the shape its op requires.
    #[error("Invalid {op} payload for {id}: {source}")]
    Payload {
        op: TrailOp,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A trail line carries a timestamp that is not RFC 3339.
    #[error("Invalid trail timestamp '{ts}' for {id}: {source}")]
    Timestamp {
        id: String,
        ts: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An intake record was rejected. `line` is 1-based.
    #[error("Intake record on line {line} rejected: {source}")]
    Intake {
        line: usize,
        #[source]
        source: CoreError,
    },

    /// Replaying an op produced a different state than was recorded.
    #[error("Trail replay diverged at {op} on {id}: {reason}")]
    Diverged {
        op: TrailOp,
        id: String,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The state model error underneath, if any.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) | Self::Intake { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
