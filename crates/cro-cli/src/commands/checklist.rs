use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ItemRefArgs, NoteArgs, PhotoArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `cro toggle <id> <label>`.
pub fn toggle(args: &ItemRefArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let item = ctx.service.toggle_item(&args.id, &args.label)?;
    tracing::info!(id = %args.id, label = %args.label, done = item.done, "item toggled");
    output(&item, flags.format)
}

/// Handle `cro note <id> <label> <text>`.
pub fn note(args: &NoteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let item = ctx.service.attach_note(&args.id, &args.label, &args.text)?;
    tracing::info!(id = %args.id, label = %args.label, cleared = item.note.is_none(), "note attached");
    output(&item, flags.format)
}

/// Handle `cro photo <id> <label> [--reference R]`.
pub fn photo(args: &PhotoArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let item = ctx
        .service
        .attach_photo(&args.id, &args.label, args.reference.as_deref())?;
    tracing::info!(id = %args.id, label = %args.label, "photo attached");
    output(&item, flags.format)
}
