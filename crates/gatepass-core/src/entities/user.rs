use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, HostelType, Role};

/// An account: student, guard, or admin.
///
/// Registration and login live outside this backend; the record is read here
/// to resolve the acting student or guard. Credentials are never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: Role,
    pub gender: Option<Gender>,
    /// Student's hostel. Required for any check.
    pub hostel_type: Option<HostelType>,
    /// Guard's duty hostel.
    pub assigned_hostel: Option<HostelType>,
    pub room_number: Option<String>,
    pub parent_phone: Option<String>,
    pub session: Option<String>,
    pub branch: Option<String>,
    pub college: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            room_number: self.room_number.clone(),
            branch: self.branch.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Student fields shown to guards next to a log entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub room_number: Option<String>,
    pub branch: Option<String>,
    pub phone: String,
}
