//! Cross-cutting error types for gatepass.
//!
//! `CoreError` covers malformed values parsed anywhere in the system.
//! `Rejection` is the tagged outcome of a refused check attempt; the HTTP
//! layer maps each `RejectionKind` to a status code and a user-facing body.
//! Storage errors live in `gatepass-db`.

use thiserror::Error;

use crate::enums::{Direction, HostelType};
use crate::geo::round_to_cents;

/// Errors that can be raised by any gatepass crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not match any variant of an enum.
    #[error("Unknown {kind} value: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Category of a refused check attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// Malformed or missing user input.
    Validation,
    /// Device too far from the gate.
    Geofence,
    /// IN/OUT out of order.
    Sequencing,
    /// Server-side data is incomplete. Never exposes details.
    Configuration,
    /// Gate or student does not exist.
    NotFound,
    /// Actor is not allowed to use this gate.
    Forbidden,
}

impl RejectionKind {
    /// HTTP status code the route layer answers with.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation | Self::Sequencing => 400,
            Self::Geofence | Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Configuration => 500,
        }
    }
}

/// Why a check attempt (or a hostel-scoped query) was refused.
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("gateCode and direction are required")]
    MissingGateOrDirection,

    #[error("Invalid direction")]
    InvalidDirection,

    #[error("Location (lat, lng) is required")]
    MissingLocation,

    #[error("Location (lat, lng) is invalid")]
    InvalidLocation,

    #[error("Reason is required for going OUT")]
    MissingReason,

    #[error("Guard is not assigned to any hostel")]
    GuardUnassigned,

    #[error("Student hostel assignment is not configured. Contact admin.")]
    StudentWithoutHostel,

    #[error("Gate location is not configured. Contact admin.")]
    GateNotConfigured,

    #[error("Gate not found or inactive")]
    GateNotFound,

    #[error("Student not found")]
    StudentNotFound,

    #[error("You are from {student} hostel, but this gate is for {gate} hostel")]
    HostelMismatch {
        student: HostelType,
        gate: HostelType,
    },

    #[error("You must be within 5 meters of the gate to check in/out.")]
    OutOfRange { distance_meters: f64 },

    #[error("You are already checked OUT. Please check IN before going OUT again.")]
    AlreadyOut,

    #[error("You are already checked IN. Please check OUT before checking IN again.")]
    AlreadyIn,

    /// Another check for the same student landed first and left a state in
    /// which this direction would now be allowed.
    #[error("Your gate status changed while this check was processed. Please try again.")]
    StaleState,
}

impl Rejection {
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::MissingGateOrDirection
            | Self::InvalidDirection
            | Self::MissingLocation
            | Self::InvalidLocation
            | Self::MissingReason
            | Self::GuardUnassigned => RejectionKind::Validation,
            Self::StudentWithoutHostel | Self::GateNotConfigured => RejectionKind::Configuration,
            Self::GateNotFound | Self::StudentNotFound => RejectionKind::NotFound,
            Self::HostelMismatch { .. } => RejectionKind::Forbidden,
            Self::OutOfRange { .. } => RejectionKind::Geofence,
            Self::AlreadyOut | Self::AlreadyIn | Self::StaleState => RejectionKind::Sequencing,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Sequencing rejection for taking `direction` twice in a row.
    #[must_use]
    pub const fn repeated(direction: Direction) -> Self {
        match direction {
            Direction::Out => Self::AlreadyOut,
            Direction::In => Self::AlreadyIn,
        }
    }

    /// Distance to report back to the user, rounded to two decimals.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        match self {
            Self::OutOfRange { distance_meters } => Some(round_to_cents(*distance_meters)),
            _ => None,
        }
    }
}
