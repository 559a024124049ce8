//! Shared fixtures for gatepass-db tests and downstream integration tests.
//!
//! Seeds a boys' hostel with one student, one guard, and one gate located at
//! [`GATE_LAT`], [`GATE_LNG`].

use gatepass_config::GeneralConfig;
use gatepass_core::entities::{Gate, User};
use gatepass_core::enums::{HostelType, Role};

use crate::error::DatabaseError;
use crate::repos::gate::NewGate;
use crate::repos::user::NewUser;
use crate::service::GateService;

pub const GATE_LAT: f64 = 28.7041;
pub const GATE_LNG: f64 = 77.1025;
pub const GATE_CODE: &str = "BH-MAIN";

/// Open an in-memory service with default limits.
///
/// # Errors
///
/// Returns `DatabaseError` if the in-memory database cannot be opened.
pub async fn memory_service() -> Result<GateService, DatabaseError> {
    GateService::new_local(":memory:", GeneralConfig::default()).await
}

#[must_use]
pub fn new_student(name: &str, phone: &str, hostel: Option<HostelType>) -> NewUser {
    NewUser {
        name: name.into(),
        phone: phone.into(),
        hostel_type: hostel,
        room_number: Some("A-101".into()),
        branch: Some("CSE".into()),
        ..NewUser::default()
    }
}

#[must_use]
pub fn new_guard(name: &str, phone: &str, hostel: Option<HostelType>) -> NewUser {
    NewUser {
        name: name.into(),
        phone: phone.into(),
        role: Role::Guard,
        assigned_hostel: hostel,
        ..NewUser::default()
    }
}

#[must_use]
pub fn new_gate(code: &str, hostel: HostelType) -> NewGate {
    NewGate {
        name: format!("{hostel} gate {code}"),
        code: code.into(),
        hostel_type: hostel,
        is_active: true,
        latitude: Some(GATE_LAT),
        longitude: Some(GATE_LNG),
        assigned_guard: None,
    }
}

/// Everything a check test needs.
pub struct Seeded {
    pub service: GateService,
    pub student: User,
    pub guard: User,
    pub gate: Gate,
}

/// In-memory service seeded with a boys' student, guard, and gate.
///
/// # Errors
///
/// Returns `DatabaseError` if any insert fails.
pub async fn seeded_service() -> Result<Seeded, DatabaseError> {
    let service = memory_service().await?;
    let student = service
        .create_user(&new_student("Rohan", "9000000001", Some(HostelType::Boys)))
        .await?;
    let guard = service
        .create_user(&new_guard("Mahesh", "9000000002", Some(HostelType::Boys)))
        .await?;
    let gate = service
        .create_gate(&new_gate(GATE_CODE, HostelType::Boys))
        .await?;
    Ok(Seeded {
        service,
        student,
        guard,
        gate,
    })
}
