//! Resolution of the calling user.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::request::Parts;

use gatepass_core::entities::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the verified user id from the auth gateway.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The authenticated user making the request.
#[derive(Debug, Clone)]
pub struct Actor(pub User);

impl FromRequestParts<Arc<AppState>> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(&USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        state
            .service
            .find_user(id)
            .await?
            .map(Self)
            .ok_or(ApiError::Unauthorized)
    }
}
