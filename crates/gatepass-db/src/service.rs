//! Service layer over the gate-pass store.
//!
//! `GateService` wraps `GateDb` and the configured listing limits. All repo
//! methods are implemented as `impl GateService` blocks.

use gatepass_config::GeneralConfig;

use crate::GateDb;
use crate::error::DatabaseError;

pub struct GateService {
    db: GateDb,
    limits: GeneralConfig,
}

impl GateService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `limits` - Listing caps from the `general` config section.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, limits: GeneralConfig) -> Result<Self, DatabaseError> {
        let db = GateDb::open_local(db_path).await?;
        Ok(Self::from_db(db, limits))
    }

    #[must_use]
    pub const fn from_db(db: GateDb, limits: GeneralConfig) -> Self {
        Self { db, limits }
    }

    #[must_use]
    pub const fn db(&self) -> &GateDb {
        &self.db
    }

    #[must_use]
    pub const fn limits(&self) -> &GeneralConfig {
        &self.limits
    }
}
