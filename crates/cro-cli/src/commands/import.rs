use std::path::Path;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportResponse {
    imported: usize,
    ids: Vec<String>,
}

/// Handle `cro import <file>`.
pub fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.service.import(Path::new(&args.file))?;
    let response = ImportResponse {
        imported: tasks.len(),
        ids: tasks.into_iter().map(|task| task.id).collect(),
    };
    output(&response, flags.format)
}
