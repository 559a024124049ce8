use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{GateSummary, StudentSummary};
use crate::enums::{Direction, HostelType, VisitStatus};

/// An immutable record of one accepted check-in or check-out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitLog {
    pub id: String,
    /// User ID of the student.
    pub student: String,
    /// Gate ID.
    pub gate: String,
    pub hostel_type: HostelType,
    pub direction: Direction,
    /// Present only for `OUT`.
    pub reason: Option<String>,
    pub status: VisitStatus,
    pub handled_by: Option<String>,
    pub handled_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A visit log ready to insert. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitLogDraft {
    pub student: String,
    pub gate: String,
    pub hostel_type: HostelType,
    pub direction: Direction,
    pub reason: Option<String>,
    pub status: VisitStatus,
    pub timestamp: DateTime<Utc>,
}

impl VisitLogDraft {
    /// Attach store-assigned fields.
    #[must_use]
    pub fn into_log(self, id: String, created_at: DateTime<Utc>) -> VisitLog {
        VisitLog {
            id,
            student: self.student,
            gate: self.gate,
            hostel_type: self.hostel_type,
            direction: self.direction,
            reason: self.reason,
            status: self.status,
            handled_by: None,
            handled_at: None,
            timestamp: self.timestamp,
            created_at,
        }
    }
}

/// A visit log joined with the gate and, for guard views, the student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitLogDetail {
    #[serde(flatten)]
    pub log: VisitLog,
    pub gate_info: Option<GateSummary>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub student_info: Option<StudentSummary>,
}
