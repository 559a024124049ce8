//! Gate repository.

use chrono::Utc;
use serde::Deserialize;

use gatepass_core::entities::Gate;
use gatepass_core::enums::HostelType;
use gatepass_core::geo::Coordinates;
use gatepass_core::ids::PREFIX_GATE;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_bool, get_opt_f64, get_opt_string, parse_datetime, parse_enum};
use crate::service::GateService;

const GATE_COLUMNS: &str =
    "id, name, code, hostel_type, is_active, latitude, longitude, assigned_guard, created_at";

const fn default_active() -> bool {
    true
}

/// Fields for a new gate, as written in an import file.
///
/// Coordinates may be left out; such a gate refuses every check until an
/// admin fills them in.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGate {
    pub name: String,
    pub code: String,
    pub hostel_type: HostelType,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub assigned_guard: Option<String>,
}

fn row_to_gate(row: &libsql::Row) -> Result<Gate, DatabaseError> {
    Ok(Gate {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        code: row.get::<String>(2)?,
        hostel_type: parse_enum(&row.get::<String>(3)?)?,
        is_active: get_bool(row, 4)?,
        latitude: get_opt_f64(row, 5)?,
        longitude: get_opt_f64(row, 6)?,
        assigned_guard: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl GateService {
    /// Insert a gate. The code is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a blank code or out-of-range
    /// coordinates, and `DatabaseError::LibSql` when the code is taken.
    pub async fn create_gate(&self, new: &NewGate) -> Result<Gate, DatabaseError> {
        let code = new.code.trim();
        if code.is_empty() {
            return Err(DatabaseError::InvalidState("gate code is required".into()));
        }
        if let (Some(latitude), Some(longitude)) = (new.latitude, new.longitude) {
            Coordinates::new(latitude, longitude)
                .map_err(|e| DatabaseError::InvalidState(format!("gate {code}: {e}")))?;
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_GATE).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO gates ({GATE_COLUMNS}, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    new.name.trim(),
                    code,
                    new.hostel_type.as_str(),
                    i64::from(new.is_active),
                    new.latitude,
                    new.longitude,
                    new.assigned_guard.as_deref(),
                    format_timestamp(&now)
                ],
            )
            .await?;

        self.get_gate(&id).await
    }

    /// Get a gate by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the gate does not exist.
    pub async fn get_gate(&self, id: &str) -> Result<Gate, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {GATE_COLUMNS} FROM gates WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_gate(&row)
    }

    /// Resolve an active gate by its code. Inactive gates are invisible.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_active_gate_by_code(&self, code: &str) -> Result<Option<Gate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {GATE_COLUMNS} FROM gates WHERE code = ?1 AND is_active = 1"),
                [code.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_gate(&row)?)),
            None => Ok(None),
        }
    }

    /// List gates, optionally only those of one hostel.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_gates(&self, hostel: Option<HostelType>) -> Result<Vec<Gate>, DatabaseError> {
        let mut rows = match hostel {
            Some(h) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {GATE_COLUMNS} FROM gates WHERE hostel_type = ?1 ORDER BY code"
                        ),
                        [h.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(&format!("SELECT {GATE_COLUMNS} FROM gates ORDER BY code"), ())
                    .await?
            }
        };

        let mut gates = Vec::new();
        while let Some(row) = rows.next().await? {
            gates.push(row_to_gate(&row)?);
        }
        Ok(gates)
    }
}
