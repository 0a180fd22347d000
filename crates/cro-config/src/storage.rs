//! Storage locations for the trail journal and catalog.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> String {
    ".cro".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `trail.jsonl`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Optional TOML checklist catalog. The built-in catalog is used when empty.
    #[serde(default)]
    pub catalog_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_file: String::new(),
        }
    }
}

impl StorageConfig {
    /// Path of the JSONL trail inside `data_dir`.
    #[must_use]
    pub fn trail_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("trail.jsonl")
    }

    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        (!self.catalog_file.is_empty()).then(|| PathBuf::from(&self.catalog_file))
    }
}
