//! Entity structs for gatepass domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `gatepass-db/migrations/001_initial.sql`). Wire names are camelCase.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod gate;
mod user;
mod visit_log;

pub use gate::{Gate, GateSummary};
pub use user::{StudentSummary, User};
pub use visit_log::{VisitLog, VisitLogDetail, VisitLogDraft};
