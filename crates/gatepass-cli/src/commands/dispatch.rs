use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
        Commands::Check(args) => commands::check::handle(&args, &ctx, flags).await,
        Commands::Logs(args) => commands::logs::handle(&args, &ctx, flags).await,
        Commands::LastLog(args) => commands::last_log::handle(&args, &ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, &ctx, flags).await,
    }
}
