use gatepass_config::GatepassConfig;

use crate::cli::GlobalFlags;

/// Load layered config (`.env`, TOML, `GATEPASS_*`) and apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GatepassConfig> {
    let mut config = GatepassConfig::load_with_dotenv()?;

    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
        config.validate()?;
    }

    tracing::debug!(
        database = %config.database.path,
        address = %config.server.address(),
        "configuration loaded"
    );
    Ok(config)
}
