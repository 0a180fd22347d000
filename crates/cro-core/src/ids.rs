//! ID prefix constants and generation.
//!
//! Task IDs look like `tsk-a3f8b2c1`: a three-letter prefix, a dash, and
//! eight lowercase hex characters drawn from the OS random source.

use std::fmt::Write as _;

use crate::errors::CoreError;

pub const PREFIX_TASK: &str = "tsk";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK];

/// Generate a random prefixed ID, e.g. `"tsk-a3f8b2c1"`.
///
/// # Errors
///
/// Returns `CoreError::RandomSource` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::RandomSource(e.to_string()))?;
    Ok(format_id(prefix, bytes))
}

/// Format raw bytes as a prefixed hex ID.
#[must_use]
pub fn format_id(prefix: &str, bytes: [u8; 4]) -> String {
    let mut id = String::with_capacity(prefix.len() + 9);
    id.push_str(prefix);
    id.push('-');
    for byte in bytes {
        let _ = write!(id, "{byte:02x}");
    }
    id
}

/// Whether `id` carries the given prefix followed by eight hex characters.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
