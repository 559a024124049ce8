//! Error responses.
//!
//! Every error answers with `{message}`; geofence rejections add the
//! rounded `distance`. Storage failures are logged and answered with a
//! generic 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use gatepass_core::errors::Rejection;
use gatepass_core::responses::ErrorBody;
use gatepass_db::error::{CheckError, DatabaseError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Route not found")]
    NotFound,

    #[error("Malformed request body")]
    MalformedBody,

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Server error")]
    Storage(#[from] DatabaseError),
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Rejected(rejection) => Self::Rejected(rejection),
            CheckError::Database(db) => Self::Storage(db),
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedBody => StatusCode::BAD_REQUEST,
            Self::Rejected(rejection) => StatusCode::from_u16(rejection.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            distance: match self {
                Self::Rejected(rejection) => rejection.distance(),
                _ => None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage(ref err) = self {
            error!(error = %err, "storage failure");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
