use gatepass_core::responses::LastLogResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LastLogArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &LastLogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let log = ctx.service.last_student_log(&args.student).await?;
    output(&LastLogResponse { log }, flags.format)
}
