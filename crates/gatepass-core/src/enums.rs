//! Directions, statuses, hostels, roles, and the presence state machine.
//!
//! Directions serialize in upper case (`IN`/`OUT`); every other enum uses
//! lower case. `as_str()` returns the exact text stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a gate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// Parse user input case-insensitively (`"out"`, `"Out"`, `"OUT"`).
    #[must_use]
    pub fn parse_loose(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "IN" => Some(Self::In),
            "OUT" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| CoreError::UnknownVariant {
            kind: "direction",
            value: s.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// PresenceState
// ---------------------------------------------------------------------------

/// Where a student currently is relative to the hostel.
///
/// ```text
/// inside --OUT--> outside
/// outside --IN--> inside
/// ```
///
/// A student with no approved history is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    Inside,
    Outside,
}

impl PresenceState {
    /// Derive the state from the direction of the last approved log.
    #[must_use]
    pub const fn from_last_direction(last: Option<Direction>) -> Self {
        match last {
            Some(Direction::Out) => Self::Outside,
            Some(Direction::In) | None => Self::Inside,
        }
    }

    /// The only direction admissible from this state.
    #[must_use]
    pub const fn allowed_direction(self) -> Direction {
        match self {
            Self::Inside => Direction::Out,
            Self::Outside => Direction::In,
        }
    }

    #[must_use]
    pub fn can_take(self, direction: Direction) -> bool {
        self.allowed_direction() == direction
    }

    /// State after taking `direction`. Only meaningful when `can_take` holds.
    #[must_use]
    pub const fn after(direction: Direction) -> Self {
        match direction {
            Direction::Out => Self::Outside,
            Direction::In => Self::Inside,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VisitStatus
// ---------------------------------------------------------------------------

/// Approval status of a visit log. The check flow only ever writes `approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Approved,
    Rejected,
}

impl VisitStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HostelType
// ---------------------------------------------------------------------------

/// Which hostel a student, guard, gate, or log belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HostelType {
    Boys,
    Girls,
}

impl HostelType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boys => "boys",
            Self::Girls => "girls",
        }
    }
}

impl fmt::Display for HostelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostelType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boys" => Ok(Self::Boys),
            "girls" => Ok(Self::Girls),
            _ => Err(CoreError::UnknownVariant {
                kind: "hostel type",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Guard,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Guard => "guard",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
