//! Entity structs for the field tracker domain.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! same types double as the persisted record format and the JSON the CLI
//! prints.

mod checklist;
mod notification;
mod task;

pub use checklist::{ChecklistCategory, ItemState};
pub use notification::Notification;
pub use task::{NewTask, Task};
