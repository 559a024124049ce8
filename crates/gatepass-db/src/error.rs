//! Database error types for gatepass-db.

use gatepass_core::errors::Rejection;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

/// Outcome of a refused or failed check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The attempt was refused; the message is user-facing.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Storage failed; details must not reach the user.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl CheckError {
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Database(_) => None,
        }
    }
}
