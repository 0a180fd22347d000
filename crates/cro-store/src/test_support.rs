//! Shared fixtures for cro-store unit tests.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use cro_core::entities::{NewTask, Task};
use cro_core::enums::{Horizon, Outcome, Priority, TaskStatus};

use crate::catalog::ChecklistCatalog;
use crate::clock::FixedClock;
use crate::store::TaskStore;

pub const BOSTON: &str = "tsk-b0570001";
pub const CHICAGO: &str = "tsk-c0000002";
pub const NYC: &str = "tsk-0000a003";
pub const LA: &str = "tsk-1a000004";
pub const MIAMI: &str = "tsk-3a000005";
pub const SEATTLE: &str = "tsk-5ea77006";

pub const TEMP_LOGS: &str = "Temperature logs reviewed";

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

/// The fixed "today" of the sample data set.
pub fn today() -> NaiveDate {
    date("2025-01-03")
}

/// Bare task with no checklist, for rule and horizon tests.
pub fn task_on(scheduled: &str, status: TaskStatus, horizon: Horizon) -> Task {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    Task {
        id: "tsk-00000000".into(),
        site: "Boston Clinical Center".into(),
        activity_type: "Site Inspection".into(),
        scheduled_date: date(scheduled),
        status,
        priority: Priority::Medium,
        outcome: None,
        horizon,
        checklist_category: None,
        item_states: Vec::new(),
        completed_on: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

/// Six tasks across all three horizons, clock fixed at [`today`].
pub fn sample_store() -> TaskStore {
    let store = TaskStore::builder(Arc::new(ChecklistCatalog::builtin()))
        .clock(Arc::new(FixedClock::at_date(today())))
        .build();
    for record in sample_records() {
        store.insert_task(record).unwrap();
    }
    store
}

pub fn sample_records() -> Vec<NewTask> {
    vec![
        NewTask::new("Boston Clinical Center", "Site Inspection", date("2025-01-03"), Horizon::Current)
            .with_id(BOSTON)
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::High)
            .with_category("Physical Site Inspections"),
        NewTask::new("Chicago Research Lab", "Staff Training", date("2025-01-02"), Horizon::Current)
            .with_id(CHICAGO)
            .with_status(TaskStatus::Started)
            .with_category("Staff Training"),
        NewTask::new("NYC Medical", "Protocol Review", date("2025-01-05"), Horizon::Upcoming)
            .with_id(NYC)
            .with_status(TaskStatus::Pending),
        NewTask::new("LA Research", "Deviation Assessment", date("2025-01-07"), Horizon::Upcoming)
            .with_id(LA)
            .with_priority(Priority::Low)
            .with_category("Protocol Deviations"),
        NewTask::new("Miami Clinical", "Staff Training", date("2024-12-30"), Horizon::Past)
            .with_id(MIAMI)
            .with_status(TaskStatus::Completed)
            .with_outcome(Outcome::Passed)
            .with_category("Staff Training"),
        NewTask::new("Seattle Center", "Site Inspection", date("2024-12-29"), Horizon::Past)
            .with_id(SEATTLE)
            .with_status(TaskStatus::Completed)
            .with_outcome(Outcome::IssuesFound),
    ]
}
