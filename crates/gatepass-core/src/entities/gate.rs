use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::HostelType;
use crate::geo::Coordinates;

/// A physical entry/exit point of a hostel.
///
/// Coordinates are optional at rest so that gates created before geofencing
/// still load; a gate without both of them cannot accept checks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub id: String,
    pub name: String,
    pub code: String,
    pub hostel_type: HostelType,
    pub is_active: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub assigned_guard: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Gate {
    /// The gate position, or `None` when either coordinate is missing.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> GateSummary {
        GateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            code: self.code.clone(),
            hostel_type: self.hostel_type,
        }
    }
}

/// Gate fields shown next to a log entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GateSummary {
    pub id: String,
    pub name: String,
    pub code: String,
    pub hostel_type: HostelType,
}
