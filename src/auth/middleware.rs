//! Route guards.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use super::token::Claims;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::users::model::Role;

/// Require a valid bearer token; stores the decoded [`Claims`] in request
/// extensions for downstream handlers and guards.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(ApiError::Unauthorized("Authorization token is required"));
    };

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::Forbidden("Invalid or expired token"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Require the authenticated caller to hold the admin role.
///
/// Must sit inside `require_auth`, which populates the claims extension.
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let Some(claims) = request.extensions().get::<Claims>() else {
        return Err(ApiError::Unauthorized("User not authenticated"));
    };

    if claims.role != Role::Admin {
        return Err(ApiError::Forbidden("Access denied"));
    }

    Ok(next.run(request).await)
}
