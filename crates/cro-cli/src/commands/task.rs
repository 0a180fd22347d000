use std::collections::HashSet;

use cro_core::entities::Task;
use cro_core::enums::{Horizon, Outcome, TaskStatus};
use cro_store::TaskStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{CompleteArgs, GetArgs, StatusArgs, TasksArgs};
use crate::context::AppContext;
use crate::output::{output, output_tasks};

/// Handle `cro tasks [--horizon H] [--category C]`.
pub fn list(args: &TasksArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let horizon = args
        .horizon
        .as_deref()
        .map(str::parse::<Horizon>)
        .transpose()?;
    let tasks = select_tasks(ctx.service.store(), horizon, args.category.as_deref())?;
    output_tasks(&tasks, flags.format)
}

/// Tasks in insertion order, narrowed by category and then by horizon.
pub fn select_tasks(
    store: &TaskStore,
    horizon: Option<Horizon>,
    category: Option<&str>,
) -> anyhow::Result<Vec<Task>> {
    let tasks = match (horizon, category) {
        (None, None) => store.list_tasks(),
        (Some(horizon), None) => store.tasks_by_horizon(horizon),
        (None, Some(category)) => store.tasks_by_category(category)?,
        (Some(horizon), Some(category)) => {
            let in_horizon: HashSet<String> = store
                .tasks_by_horizon(horizon)
                .into_iter()
                .map(|task| task.id)
                .collect();
            let mut tasks = store.tasks_by_category(category)?;
            tasks.retain(|task| in_horizon.contains(&task.id));
            tasks
        }
    };
    Ok(tasks)
}

/// Handle `cro get <id>`.
pub fn get(args: &GetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx.service.store().get_task(&args.id)?;
    output(&task, flags.format)
}

/// Handle `cro complete <id> --outcome O`.
pub fn complete(args: &CompleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome: Outcome = args.outcome.parse()?;
    let task = ctx.service.mark_complete(&args.id, outcome)?;
    tracing::info!(id = %task.id, %outcome, "task completed");
    output(&task, flags.format)
}

/// Handle `cro status <id> <status>`.
pub fn status(args: &StatusArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let to: TaskStatus = args.status.parse()?;
    let transition = ctx.service.set_status(&args.id, to)?;
    tracing::info!(id = %args.id, from = %transition.from, %to, "status changed");
    output(&transition, flags.format)
}
