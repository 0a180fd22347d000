use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cro notifications`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let notifications = ctx.service.store().urgent_notifications();
    tracing::debug!(
        count = notifications.len(),
        window_days = ctx.config.notifications.certification_window_days,
        "notifications evaluated"
    );
    output(&notifications, flags.format)
}
