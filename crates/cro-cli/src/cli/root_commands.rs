use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List checklist categories.
    Categories,
    /// List the checklist items of a category.
    Items(ItemsArgs),
    /// List tasks, optionally filtered by horizon and category.
    Tasks(TasksArgs),
    /// Get a task by ID.
    Get(GetArgs),
    /// Complete a task with an outcome.
    Complete(CompleteArgs),
    /// Move a task to another open status.
    Status(StatusArgs),
    /// Flip a checklist item between done and not done.
    Toggle(ItemRefArgs),
    /// Set or clear the note on a checklist item.
    Note(NoteArgs),
    /// Record a photo for a checklist item.
    Photo(PhotoArgs),
    /// Show urgent notifications.
    Notifications,
    /// Import tasks from a JSONL intake file.
    Import(ImportArgs),
    /// Print the JSON schema of a record type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ItemsArgs {
    pub category: String,
}

#[derive(Clone, Debug, Args)]
pub struct TasksArgs {
    /// current, upcoming, or past
    #[arg(long)]
    pub horizon: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct GetArgs {
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct CompleteArgs {
    pub id: String,
    /// passed or issues_found
    #[arg(long)]
    pub outcome: String,
}

#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    pub id: String,
    /// pending, started, or in_progress
    pub status: String,
}

#[derive(Clone, Debug, Args)]
pub struct ItemRefArgs {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, Args)]
pub struct NoteArgs {
    pub id: String,
    pub label: String,
    /// Note text. An empty string clears the note.
    pub text: String,
}

#[derive(Clone, Debug, Args)]
pub struct PhotoArgs {
    pub id: String,
    pub label: String,
    /// Opaque reference to the captured photo.
    #[arg(long)]
    pub reference: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// task, new_task, category, notification, or trail_operation
    #[arg(value_name = "TYPE")]
    pub type_name: String,
}
