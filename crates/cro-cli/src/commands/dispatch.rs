use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Categories => commands::catalog::categories(ctx, flags),
        Commands::Items(args) => commands::catalog::items(&args, ctx, flags),
        Commands::Tasks(args) => commands::task::list(&args, ctx, flags),
        Commands::Get(args) => commands::task::get(&args, ctx, flags),
        Commands::Complete(args) => commands::task::complete(&args, ctx, flags),
        Commands::Status(args) => commands::task::status(&args, ctx, flags),
        Commands::Toggle(args) => commands::checklist::toggle(&args, ctx, flags),
        Commands::Note(args) => commands::checklist::note(&args, ctx, flags),
        Commands::Photo(args) => commands::checklist::photo(&args, ctx, flags),
        Commands::Notifications => commands::notifications::handle(ctx, flags),
        Commands::Import(args) => commands::import::handle(&args, ctx, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
