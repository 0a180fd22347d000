use anyhow::bail;
use cro_core::entities::{ChecklistCategory, NewTask, Notification, Task};
use cro_core::trail::TrailOperation;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// JSON schema of a persisted or exchanged record type.
pub fn schema_value(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name.replace('-', "_").as_str() {
        "task" => schema_for!(Task),
        "new_task" => schema_for!(NewTask),
        "category" => schema_for!(ChecklistCategory),
        "notification" => schema_for!(Notification),
        "trail_operation" => schema_for!(TrailOperation),
        _ => bail!(
            "unknown schema type '{type_name}' (expected task, new_task, category, notification, trail_operation)"
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `cro schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(&args.type_name)?, flags.format)
}

#[cfg(test)]
mod tests {
    use super::schema_value;

    #[test]
    fn task_schema_lists_status_values() {
        let schema = schema_value("task").unwrap();
        let text = schema.to_string();
        assert!(text.contains("in_progress"));
        assert!(text.contains("scheduled_date"));
    }

    #[test]
    fn hyphenated_names_are_accepted() {
        assert!(schema_value("new-task").is_ok());
        assert!(schema_value("trail-operation").is_ok());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = schema_value("audit").unwrap_err();
        assert!(err.to_string().contains("unknown schema type 'audit'"));
    }
}
