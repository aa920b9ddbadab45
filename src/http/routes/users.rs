//! Admin user-management handlers.
//!
//! All routes here sit behind the auth + admin guards; the router wires
//! those in. Path ids must be well-formed UUIDs.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::users::dto::UpdateUserRequest;
use crate::users::model::UserProfile;

fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest("Invalid UUID format for user ID".to_string()))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<UserProfile>> {
    Json(state.users.list().await)
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = parse_user_id(&id)?;
    let profile = state.users.get(id).await.map_err(|e| {
        tracing::error!("Error during get user request, {e}");
        ApiError::from(e)
    })?;
    Ok(Json(profile))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = parse_user_id(&id)?;
    payload.validate()?;

    let profile = state.users.update(id, payload).await.map_err(|e| {
        tracing::error!("Error during update user request, {e}");
        ApiError::from(e)
    })?;
    Ok(Json(profile))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_user_id(&id)?;
    state.users.delete(id).await.map_err(|e| {
        tracing::error!("Error during delete user request, {e}");
        ApiError::from(e)
    })?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
