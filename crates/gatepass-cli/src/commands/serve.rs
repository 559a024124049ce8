use anyhow::Context;
use gatepass_api::state::AppState;
use tracing::info;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

pub async fn handle(args: &ServeArgs, ctx: AppContext) -> anyhow::Result<()> {
    let AppContext {
        service,
        mut config,
    } = ctx;

    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    if config.database.is_in_memory() {
        info!("serving from an in-memory database; nothing will persist");
    }

    let state = AppState::new(service, config.server);
    gatepass_api::run(state).await.context("server failed")
}
