//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::dto::{LoginRequest, RegisterRequest, TokenResponse};
use crate::auth::token::Claims;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::users::model::UserProfile;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    payload.validate()?;

    let profile = state.auth.register(payload).await.map_err(|e| {
        tracing::error!("Error during registration request, {e}");
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validate()?;

    let response = state.auth.login(payload).await.map_err(|e| {
        tracing::error!("Error during login request, {e}");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

/// Profile of the caller identified by the bearer token.
pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.auth.profile(claims.sub).await.map_err(|e| {
        tracing::error!("Error during profile request, {e}");
        ApiError::from(e)
    })?;

    Ok(Json(profile))
}
