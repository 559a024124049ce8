//! Route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use gatepass_core::check::CheckRequest;
use gatepass_core::responses::{LastLogResponse, LogsResponse, ProfileResponse};

use crate::actor::Actor;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hostel Gate API is running" }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// `POST /api/student/check`
pub async fn check(
    State(state): State<Arc<AppState>>,
    Actor(user): Actor,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::MalformedBody)?;
    let receipt = state.service.record_check(&user, &request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /api/student/my-logs`
pub async fn my_logs(
    State(state): State<Arc<AppState>>,
    Actor(user): Actor,
) -> Result<Json<LogsResponse>, ApiError> {
    let logs = state.service.list_student_logs(&user.id).await?;
    Ok(Json(LogsResponse { logs }))
}

/// `GET /api/student/last-log`
pub async fn last_log(
    State(state): State<Arc<AppState>>,
    Actor(user): Actor,
) -> Result<Json<LastLogResponse>, ApiError> {
    let log = state.service.last_student_log(&user.id).await?;
    Ok(Json(LastLogResponse { log }))
}

/// `GET /api/student/me`
pub async fn me(Actor(user): Actor) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile fetched successfully".into(),
        user,
    })
}

/// `GET /api/guard/logs`
pub async fn guard_logs(
    State(state): State<Arc<AppState>>,
    Actor(user): Actor,
) -> Result<Json<LogsResponse>, ApiError> {
    let logs = state.service.guard_logs(&user).await?;
    Ok(Json(LogsResponse { logs }))
}
