use anyhow::Context;
use gatepass_config::GatepassConfig;
use gatepass_db::service::GateService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: GateService,
    pub config: GatepassConfig,
}

impl AppContext {
    pub async fn init(config: GatepassConfig) -> anyhow::Result<Self> {
        let service = GateService::new_local(&config.database.path, config.general.clone())
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        Ok(Self { service, config })
    }
}
