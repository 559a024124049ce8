//! Response bodies shared by the HTTP routes and the `gatepass` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{User, VisitLog, VisitLogDetail};
use crate::enums::Direction;

/// Body of a successful `POST /api/student/check`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CheckReceipt {
    pub message: String,
    /// Distance to the gate in meters, rounded to two decimals.
    pub distance: f64,
    pub log: VisitLog,
}

impl CheckReceipt {
    #[must_use]
    pub fn success_message(direction: Direction) -> String {
        format!("Check {direction} successful")
    }
}

/// Body of every log listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogsResponse {
    pub logs: Vec<VisitLogDetail>,
}

/// Body of `GET /api/student/last-log`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LastLogResponse {
    pub log: Option<VisitLogDetail>,
}

/// Body of `GET /api/student/me`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileResponse {
    pub message: String,
    pub user: User,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance: Option<f64>,
}
