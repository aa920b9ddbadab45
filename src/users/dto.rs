//! Request payloads for user management.

use serde::Deserialize;
use validator::Validate;

use super::model::Role;

/// Partial update; absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    #[validate(email, length(max = 128))]
    pub email: Option<String>,

    /// Re-hashed before storage when present.
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,

    pub role: Option<Role>,
}
