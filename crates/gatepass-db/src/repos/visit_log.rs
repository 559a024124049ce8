//! Visit log repository.
//!
//! The log is append-only. Ordering is by `timestamp` with insertion order
//! (`rowid`) breaking ties, so two logs written in the same microsecond
//! still have a well-defined newest entry.

use chrono::{DateTime, Utc};

use gatepass_core::entities::{GateSummary, StudentSummary, VisitLog, VisitLogDetail, VisitLogDraft};
use gatepass_core::enums::{Direction, HostelType};
use gatepass_core::ids::PREFIX_VISIT_LOG;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::service::GateService;

const LOG_COLUMNS: &str = "l.id, l.student_id, l.gate_id, l.hostel_type, l.direction, l.reason, \
     l.status, l.handled_by, l.handled_at, l.timestamp, l.created_at";

/// Log columns followed by gate summary (11..=14) and student summary (15..=19).
const DETAIL_COLUMNS: &str = "l.id, l.student_id, l.gate_id, l.hostel_type, l.direction, l.reason, \
     l.status, l.handled_by, l.handled_at, l.timestamp, l.created_at, \
     g.id, g.name, g.code, g.hostel_type, \
     u.id, u.name, u.room_number, u.branch, u.phone";

const DETAIL_FROM: &str = "FROM visit_logs l \
     LEFT JOIN gates g ON g.id = l.gate_id \
     LEFT JOIN users u ON u.id = l.student_id";

const NEWEST_FIRST: &str = "ORDER BY l.timestamp DESC, l.rowid DESC";

/// Stands in for "no prior approved log" in the guarded insert.
const NO_PRIOR: &str = "NONE";

/// Filter criteria for log queries.
#[derive(Debug, Default, Clone)]
pub struct LogFilter {
    pub student: Option<String>,
    /// Gate ID or gate code.
    pub gate: Option<String>,
    pub hostel: Option<HostelType>,
    pub direction: Option<Direction>,
    /// Inclusive lower bound on `timestamp`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`.
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

fn row_to_log(row: &libsql::Row) -> Result<VisitLog, DatabaseError> {
    Ok(VisitLog {
        id: row.get::<String>(0)?,
        student: row.get::<String>(1)?,
        gate: row.get::<String>(2)?,
        hostel_type: parse_enum(&row.get::<String>(3)?)?,
        direction: parse_enum(&row.get::<String>(4)?)?,
        reason: get_opt_string(row, 5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        handled_by: get_opt_string(row, 7)?,
        handled_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
        timestamp: parse_datetime(&row.get::<String>(9)?)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

fn row_to_detail(row: &libsql::Row, with_student: bool) -> Result<VisitLogDetail, DatabaseError> {
    let log = row_to_log(row)?;

    let gate_info = match get_opt_string(row, 11)? {
        Some(id) => Some(GateSummary {
            id,
            name: row.get::<String>(12)?,
            code: row.get::<String>(13)?,
            hostel_type: parse_enum(&row.get::<String>(14)?)?,
        }),
        None => None,
    };

    let student_info = match (with_student, get_opt_string(row, 15)?) {
        (true, Some(id)) => Some(StudentSummary {
            id,
            name: row.get::<String>(16)?,
            room_number: get_opt_string(row, 17)?,
            branch: get_opt_string(row, 18)?,
            phone: row.get::<String>(19)?,
        }),
        _ => None,
    };

    Ok(VisitLogDetail {
        log,
        gate_info,
        student_info,
    })
}

async fn collect_details(
    mut rows: libsql::Rows,
    with_student: bool,
) -> Result<Vec<VisitLogDetail>, DatabaseError> {
    let mut logs = Vec::new();
    while let Some(row) = rows.next().await? {
        logs.push(row_to_detail(&row, with_student)?);
    }
    Ok(logs)
}

impl GateService {
    /// Newest approved log of a student, the input to IN/OUT sequencing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn last_approved_log(&self, student_id: &str) -> Result<Option<VisitLog>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {LOG_COLUMNS} FROM visit_logs l
                     WHERE l.student_id = ?1 AND l.status = 'approved'
                     {NEWEST_FIRST} LIMIT 1"
                ),
                [student_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_log(&row)?)),
            None => Ok(None),
        }
    }

    /// Append `draft` only while the student's newest approved direction is
    /// still `prior`.
    ///
    /// The check and the insert are one statement, so SQLite's write lock
    /// makes them atomic. Returns `None` when another check got there first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement or the read-back fails.
    pub async fn insert_visit_log_guarded(
        &self,
        draft: &VisitLogDraft,
        prior: Option<Direction>,
    ) -> Result<Option<VisitLog>, DatabaseError> {
        let id = self.db().generate_id(PREFIX_VISIT_LOG).await?;
        let now = Utc::now();

        let inserted = self
            .db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO visit_logs
                         (id, student_id, gate_id, hostel_type, direction, reason, status, timestamp, created_at)
                     SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
                     WHERE COALESCE(
                         (SELECT l.direction FROM visit_logs l
                          WHERE l.student_id = ?2 AND l.status = 'approved'
                          {NEWEST_FIRST} LIMIT 1),
                         '{NO_PRIOR}'
                     ) = ?10"
                ),
                libsql::params![
                    id.as_str(),
                    draft.student.as_str(),
                    draft.gate.as_str(),
                    draft.hostel_type.as_str(),
                    draft.direction.as_str(),
                    draft.reason.as_deref(),
                    draft.status.as_str(),
                    format_timestamp(&draft.timestamp),
                    format_timestamp(&now),
                    prior.map_or(NO_PRIOR, Direction::as_str)
                ],
            )
            .await?;

        if inserted == 0 {
            return Ok(None);
        }
        self.get_visit_log(&id).await.map(Some)
    }

    /// Get a visit log by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the log does not exist.
    pub async fn get_visit_log(&self, id: &str) -> Result<VisitLog, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {LOG_COLUMNS} FROM visit_logs l WHERE l.id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_log(&row)
    }

    /// Every log of a student, newest first, with gate info.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_student_logs(&self, student_id: &str) -> Result<Vec<VisitLogDetail>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
                     WHERE l.student_id = ?1 {NEWEST_FIRST}"
                ),
                [student_id],
            )
            .await?;
        collect_details(rows, false).await
    }

    /// Newest log of a student regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn last_student_log(&self, student_id: &str) -> Result<Option<VisitLogDetail>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
                     WHERE l.student_id = ?1 {NEWEST_FIRST} LIMIT 1"
                ),
                [student_id],
            )
            .await?;
        Ok(collect_details(rows, false).await?.into_iter().next())
    }

    /// Newest logs of a hostel with student and gate info, for guards.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_hostel_logs(
        &self,
        hostel: HostelType,
        limit: u32,
    ) -> Result<Vec<VisitLogDetail>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
                     WHERE l.hostel_type = ?1 {NEWEST_FIRST} LIMIT {limit}"
                ),
                [hostel.as_str()],
            )
            .await?;
        collect_details(rows, true).await
    }

    /// Query logs with optional filters. The limit is capped at
    /// `general.query_log_limit`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_logs(&self, filter: &LogFilter) -> Result<Vec<VisitLogDetail>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref student) = filter.student {
            params.push(libsql::Value::Text(student.clone()));
            conditions.push(format!("l.student_id = ?{}", params.len()));
        }
        if let Some(ref gate) = filter.gate {
            params.push(libsql::Value::Text(gate.trim().to_string()));
            let n = params.len();
            conditions.push(format!("(l.gate_id = ?{n} OR g.code = ?{n})"));
        }
        if let Some(hostel) = filter.hostel {
            params.push(libsql::Value::Text(hostel.as_str().to_string()));
            conditions.push(format!("l.hostel_type = ?{}", params.len()));
        }
        if let Some(direction) = filter.direction {
            params.push(libsql::Value::Text(direction.as_str().to_string()));
            conditions.push(format!("l.direction = ?{}", params.len()));
        }
        if let Some(ref from) = filter.from {
            params.push(libsql::Value::Text(format_timestamp(from)));
            conditions.push(format!("l.timestamp >= ?{}", params.len()));
        }
        if let Some(ref to) = filter.to {
            params.push(libsql::Value::Text(format_timestamp(to)));
            conditions.push(format!("l.timestamp <= ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let cap = self.limits().query_log_limit;
        let limit = filter.limit.map_or(cap, |l| l.min(cap));
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} {where_clause} {NEWEST_FIRST} LIMIT {limit}"
        );

        let rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        collect_details(rows, true).await
    }
}
