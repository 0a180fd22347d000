pub mod catalog;
pub mod checklist;
pub mod dispatch;
pub mod import;
pub mod notifications;
pub mod schema;
pub mod task;
