//! # cro-store
//!
//! In-memory state for the CRO field tracker: the checklist catalog, the task
//! store with its commands and queries, urgent notification rules, and the
//! JSONL trail the store is rebuilt from.
//!
//! The store is synchronous and `Send + Sync`. Wrap it in [`FieldService`] to
//! journal every successful command.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod horizon;
pub mod intake;
pub mod rules;
pub mod service;
pub mod store;
pub mod trail;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::ChecklistCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use rules::NotificationRule;
pub use service::FieldService;
pub use store::{TaskStore, TaskStoreBuilder, Transition};
