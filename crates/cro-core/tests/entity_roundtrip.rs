//! Serde roundtrip and JsonSchema validation tests for persisted record types.

use chrono::{NaiveDate, TimeZone, Utc};
use cro_core::entities::*;
use cro_core::enums::*;
use cro_core::trail::{CompleteDetail, TrailOperation};
use pretty_assertions::assert_eq;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

roundtrip_and_validate!(
    in_progress_task_roundtrip,
    Task,
    Task {
        id: "tsk-a3f8b2c1".into(),
        site: "Boston Clinical Center".into(),
        activity_type: "Site Inspection".into(),
        scheduled_date: date(2025, 1, 3),
        status: TaskStatus::InProgress,
        priority: Priority::High,
        outcome: None,
        horizon: Horizon::Current,
        checklist_category: Some("Physical Site Inspections".into()),
        item_states: vec![
            ItemState {
                label: "Temperature logs reviewed".into(),
                done: true,
                note: Some("Freezer 2 log missing 12/28".into()),
                photo_attached: true,
                photo_ref: Some("photo://boston/freezer-2".into()),
            },
            ItemState::new("Storage conditions verified"),
        ],
        completed_on: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 3, 9, 30, 0).unwrap(),
    }
);

roundtrip_and_validate!(
    completed_task_roundtrip,
    Task,
    Task {
        id: "tsk-00c0ffee".into(),
        site: "Seattle Center".into(),
        activity_type: "Site Inspection".into(),
        scheduled_date: date(2024, 12, 29),
        status: TaskStatus::Completed,
        priority: Priority::Medium,
        outcome: Some(Outcome::IssuesFound),
        horizon: Horizon::Past,
        checklist_category: None,
        item_states: Vec::new(),
        completed_on: Some(date(2024, 12, 29)),
        created_at: Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 12, 29, 17, 0, 0).unwrap(),
    }
);

roundtrip_and_validate!(
    new_task_roundtrip,
    NewTask,
    NewTask::new("LA Research", "Deviation Assessment", date(2025, 1, 7), Horizon::Upcoming)
        .with_priority(Priority::Low)
        .with_category("Protocol Deviations")
);

roundtrip_and_validate!(
    category_roundtrip,
    ChecklistCategory,
    ChecklistCategory {
        name: "Trial Procedures".into(),
        items: vec![
            "Subject screening process".into(),
            "Sample collection observed".into(),
        ],
    }
);

roundtrip_and_validate!(
    notification_roundtrip,
    Notification,
    Notification {
        rule: "deviation_reported".into(),
        severity: Severity::Critical,
        task_id: "tsk-a3f8b2c1".into(),
        site: "Boston Clinical Center".into(),
        message: "Protocol deviation reported at Boston Clinical Center".into(),
    }
);

roundtrip_and_validate!(
    trail_complete_roundtrip,
    TrailOperation,
    TrailOperation {
        v: 1,
        ts: "2025-01-03T10:00:00+00:00".into(),
        op: TrailOp::Complete,
        id: "tsk-a3f8b2c1".into(),
        data: serde_json::to_value(CompleteDetail {
            outcome: Outcome::Passed,
            completed_on: date(2025, 1, 3),
        })
        .unwrap(),
    }
);

#[test]
fn task_schema_rejects_unknown_status() {
    let schema = serde_json::to_value(schema_for!(Task)).unwrap();
    let instance = serde_json::json!({
        "id": "tsk-1",
        "site": "NYC Medical",
        "activity_type": "Protocol Review",
        "scheduled_date": "2025-01-05",
        "status": "archived",
        "priority": "medium",
        "outcome": null,
        "horizon": "upcoming",
        "checklist_category": null,
        "item_states": [],
        "completed_on": null,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    });
    let errors = validate_against_schema(&schema, &instance);
    assert!(!errors.is_empty(), "unknown status should fail validation");
}
