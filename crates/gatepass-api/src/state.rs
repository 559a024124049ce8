//! Shared application state.

use std::sync::Arc;

use gatepass_config::{GatepassConfig, ServerConfig};
use gatepass_db::error::DatabaseError;
use gatepass_db::service::GateService;

/// Built once at startup and shared by every handler.
pub struct AppState {
    pub service: GateService,
    pub server: ServerConfig,
}

impl AppState {
    #[must_use]
    pub fn new(service: GateService, server: ServerConfig) -> Arc<Self> {
        Arc::new(Self { service, server })
    }

    /// Open the configured database and wrap it in state.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &GatepassConfig) -> Result<Arc<Self>, DatabaseError> {
        let service = GateService::new_local(&config.database.path, config.general.clone()).await?;
        Ok(Self::new(service, config.server.clone()))
    }
}
