//! Authentication.
//!
//! # Responsibilities
//! - Registration with Argon2id password hashing
//! - Login issuing 1-hour HS256 bearer tokens
//! - Profile lookup for the authenticated caller
//! - Route guards (bearer extraction, role checks)

pub mod dto;
pub mod middleware;
pub mod password;
pub mod token;

use std::sync::Arc;

use uuid::Uuid;

use crate::users::model::{Role, User, UserProfile};
use crate::users::store::{StoreError, UserStore};
use dto::{LoginRequest, RegisterRequest, TokenResponse};
use token::TokenIssuer;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Deliberately identical for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("Failed to process password")]
    Password,

    #[error("Failed to issue token")]
    Token,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, AuthError> {
        let password_hash = password::hash(&request.password).map_err(|_| AuthError::Password)?;
        let user = User::new(
            request.name,
            request.email,
            password_hash,
            request.role.unwrap_or(Role::User),
        );

        let created = self.store.create(user).await.map_err(|e| match e {
            StoreError::EmailTaken => AuthError::EmailTaken,
            StoreError::NotFound => AuthError::UserNotFound,
        })?;

        tracing::info!(user_id = %created.id, "User registered");
        Ok(UserProfile::from(created))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(&request.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user).map_err(|_| AuthError::Token)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(TokenResponse { token })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        self.store
            .find_by_id(user_id)
            .await
            .map(UserProfile::from)
            .ok_or(AuthError::UserNotFound)
    }
}
