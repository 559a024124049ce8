//! General application configuration.

use serde::{Deserialize, Serialize};

/// Logs shown to a guard for their hostel.
const fn default_guard_log_limit() -> u32 {
    50
}

/// Upper bound for filtered log queries.
const fn default_query_log_limit() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_guard_log_limit")]
    pub guard_log_limit: u32,

    #[serde(default = "default_query_log_limit")]
    pub query_log_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            guard_log_limit: default_guard_log_limit(),
            query_log_limit: default_query_log_limit(),
        }
    }
}
