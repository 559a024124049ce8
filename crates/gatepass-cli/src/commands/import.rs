use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use gatepass_core::entities::{Gate, User};
use gatepass_db::repos::gate::NewGate;
use gatepass_db::repos::user::NewUser;
use gatepass_db::service::GateService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Layout of an import file.
#[derive(Debug, Default, Deserialize)]
struct ImportFile {
    #[serde(default)]
    users: Vec<NewUser>,
    #[serde(default)]
    gates: Vec<NewGate>,
}

/// What an import created.
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub users: Vec<User>,
    pub gates: Vec<Gate>,
}

pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = import_file(&ctx.service, &args.file).await?;
    info!(
        users = summary.users.len(),
        gates = summary.gates.len(),
        file = %args.file.display(),
        "import finished"
    );
    output(&summary, flags.format)
}

/// Create every user, then every gate, listed in `path`.
///
/// Stops at the first failing record; records before it stay created.
pub async fn import_file(service: &GateService, path: &Path) -> anyhow::Result<ImportSummary> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read import file {}", path.display()))?;
    let file: ImportFile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse import file {}", path.display()))?;

    let mut summary = ImportSummary::default();
    for user in &file.users {
        let created = service
            .create_user(user)
            .await
            .with_context(|| format!("failed to import user {} ({})", user.name, user.phone))?;
        summary.users.push(created);
    }
    for gate in &file.gates {
        let created = service
            .create_gate(gate)
            .await
            .with_context(|| format!("failed to import gate {}", gate.code))?;
        summary.gates.push(created);
    }
    Ok(summary)
}
