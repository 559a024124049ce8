//! Check-in/out admission.
//!
//! A check travels through three stages, and the first failure wins:
//!
//! 1. [`CheckRequest::validate`] rejects a malformed body (missing gate code
//!    or direction, unknown direction, missing or unusable coordinates).
//! 2. [`admit_fields`] rejects a student without a hostel and an `OUT`
//!    without a reason. The service runs it before resolving the gate, so a
//!    malformed request never sees a 404.
//! 3. [`evaluate`] repeats stage 2, then checks the gate configuration, the
//!    hostel match, the geofence, and the IN/OUT sequence, and produces the
//!    record to persist.
//!
//! Everything here is pure: time and the last approved log are inputs.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Gate, User, VisitLog, VisitLogDraft};
use crate::enums::{Direction, HostelType, PresenceState, VisitStatus};
use crate::errors::Rejection;
use crate::geo::{Coordinates, exceeds_geofence};

/// A coordinate as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Raw body of `POST /api/student/check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub gate_code: Option<String>,
    pub direction: Option<String>,
    pub lat: Option<CoordinateInput>,
    pub lng: Option<CoordinateInput>,
    pub reason: Option<String>,
}

/// A well-formed check attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckAttempt {
    pub gate_code: String,
    pub direction: Direction,
    pub coordinates: Coordinates,
    pub reason: Option<String>,
}

impl CheckRequest {
    /// Validate the request shape.
    ///
    /// # Errors
    ///
    /// Returns a validation `Rejection` naming the first missing or invalid
    /// field.
    pub fn validate(&self) -> Result<CheckAttempt, Rejection> {
        let gate_code = non_blank(self.gate_code.as_deref());
        let direction = non_blank(self.direction.as_deref());
        let (Some(gate_code), Some(direction)) = (gate_code, direction) else {
            return Err(Rejection::MissingGateOrDirection);
        };

        let direction = Direction::parse_loose(direction).ok_or(Rejection::InvalidDirection)?;

        let (Some(lat), Some(lng)) = (&self.lat, &self.lng) else {
            return Err(Rejection::MissingLocation);
        };
        let coordinates = match (lat.to_f64(), lng.to_f64()) {
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)
                .map_err(|_| Rejection::InvalidLocation)?,
            _ => return Err(Rejection::InvalidLocation),
        };

        Ok(CheckAttempt {
            gate_code: gate_code.to_string(),
            direction,
            coordinates,
            reason: self.reason.clone(),
        })
    }
}

/// Result of an admissible check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub draft: VisitLogDraft,
    /// Unrounded distance between the device and the gate.
    pub distance_meters: f64,
    /// Direction of the last approved log the decision was based on.
    ///
    /// The store must only insert `draft` while this is still the latest
    /// approved direction for the student.
    pub prior_direction: Option<Direction>,
    pub state_after: PresenceState,
}

/// Field checks that precede gate resolution.
///
/// Returns the student's hostel.
///
/// # Errors
///
/// `StudentWithoutHostel` when the actor has no hostel assignment,
/// `MissingReason` for an `OUT` without a non-blank reason.
pub fn admit_fields(actor: &User, attempt: &CheckAttempt) -> Result<HostelType, Rejection> {
    let hostel = actor.hostel_type.ok_or(Rejection::StudentWithoutHostel)?;

    if attempt.direction == Direction::Out && non_blank(attempt.reason.as_deref()).is_none() {
        return Err(Rejection::MissingReason);
    }

    Ok(hostel)
}

/// Decide whether `attempt` is admissible and describe the visit log to
/// persist.
///
/// `last_approved` must be the student's newest approved log, or `None` when
/// the student has no history.
///
/// # Errors
///
/// Returns the first `Rejection` in the order described in the module docs.
pub fn evaluate(
    actor: &User,
    gate: &Gate,
    attempt: &CheckAttempt,
    last_approved: Option<&VisitLog>,
    now: DateTime<Utc>,
) -> Result<CheckOutcome, Rejection> {
    let hostel = admit_fields(actor, attempt)?;

    let gate_location = gate.location().ok_or(Rejection::GateNotConfigured)?;

    if hostel != gate.hostel_type {
        return Err(Rejection::HostelMismatch {
            student: hostel,
            gate: gate.hostel_type,
        });
    }

    let distance_meters = attempt.coordinates.distance_to(&gate_location);
    if exceeds_geofence(distance_meters) {
        return Err(Rejection::OutOfRange { distance_meters });
    }

    let prior_direction = last_approved.map(|log| log.direction);
    let state_after = sequence(prior_direction, attempt.direction)?;

    let reason = match attempt.direction {
        Direction::Out => non_blank(attempt.reason.as_deref()).map(str::to_string),
        Direction::In => None,
    };

    Ok(CheckOutcome {
        draft: VisitLogDraft {
            student: actor.id.clone(),
            gate: gate.id.clone(),
            hostel_type: hostel,
            direction: attempt.direction,
            reason,
            status: VisitStatus::Approved,
            timestamp: now,
        },
        distance_meters,
        prior_direction,
        state_after,
    })
}

/// Apply the alternation rule to the last approved direction.
///
/// # Errors
///
/// `AlreadyOut` / `AlreadyIn` when `direction` repeats the current state.
pub fn sequence(
    prior_direction: Option<Direction>,
    direction: Direction,
) -> Result<PresenceState, Rejection> {
    let current = PresenceState::from_last_direction(prior_direction);
    if current.can_take(direction) {
        return Ok(PresenceState::after(direction));
    }
    Err(Rejection::repeated(direction))
}

/// Rejection for a check whose guarded insert missed.
///
/// `stored` is the newest approved direction after the competing write. A
/// repeat of that direction is reported as such; anything else means the
/// decision was made on state that no longer holds.
#[must_use]
pub fn lost_race(stored: Option<Direction>, direction: Direction) -> Rejection {
    match sequence(stored, direction) {
        Err(rejection) => rejection,
        Ok(_) => Rejection::StaleState,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
