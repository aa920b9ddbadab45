//! Request/response payloads for authentication.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::users::model::Role;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[validate(email, length(max = 128))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    /// Defaults to [`Role::User`] when omitted.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email, length(max = 128))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
