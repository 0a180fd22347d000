use cro_core::entities::Task;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// One line per task for table listings. The full record goes to JSON.
#[derive(Debug)]
pub struct TaskRow {
    pub id: String,
    pub site: String,
    pub activity: String,
    pub date: String,
    pub status: &'static str,
    pub priority: &'static str,
    pub outcome: &'static str,
    pub checklist: String,
}

impl TaskRow {
    pub const HEADERS: [&'static str; 8] = [
        "id", "site", "activity", "date", "status", "priority", "outcome", "checklist",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.site.clone(),
            self.activity.clone(),
            self.date.clone(),
            self.status.to_string(),
            self.priority.to_string(),
            self.outcome.to_string(),
            self.checklist.clone(),
        ]
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            site: task.site.clone(),
            activity: task.activity_type.clone(),
            date: task.scheduled_date.to_string(),
            status: task.status.as_str(),
            priority: task.priority.as_str(),
            outcome: task.outcome.map_or("-", |outcome| outcome.as_str()),
            checklist: if task.item_states.is_empty() {
                String::from("-")
            } else {
                format!("{}/{}", task.done_count(), task.item_states.len())
            },
        }
    }
}

/// Render a task list: summary rows for tables, full records otherwise.
pub fn render_tasks(tasks: &[Task], format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(&tasks, format);
    }
    if tasks.is_empty() {
        return Ok(String::from("(no rows)"));
    }
    let rows = tasks
        .iter()
        .map(|task| TaskRow::from(task).cells())
        .collect::<Vec<_>>();
    Ok(table::render_entity_table(
        &TaskRow::HEADERS,
        &rows,
        table_options(),
    ))
}

pub fn output_tasks(tasks: &[Task], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_tasks(tasks, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other @ Value::Object(_) => {
            serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}
