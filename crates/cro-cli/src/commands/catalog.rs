use crate::cli::GlobalFlags;
use crate::cli::root_commands::ItemsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cro categories`.
pub fn categories(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.store().list_categories(), flags.format)
}

/// Handle `cro items <category>`.
pub fn items(args: &ItemsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let items = ctx.service.store().items_for(&args.category)?;
    output(&items, flags.format)
}
