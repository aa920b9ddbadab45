//! User management.
//!
//! # Responsibilities
//! - User record model and public projection
//! - Persistence boundary trait + in-process implementation
//! - Admin-facing CRUD operations

pub mod dto;
pub mod model;
pub mod store;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password;
use dto::UpdateUserRequest;
use model::UserProfile;
use store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("Failed to process password")]
    Password,
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => UserError::NotFound,
            StoreError::EmailTaken => UserError::EmailTaken,
        }
    }
}

/// Admin-facing CRUD over the user store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<UserProfile> {
        self.store
            .list()
            .await
            .into_iter()
            .map(UserProfile::from)
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<UserProfile, UserError> {
        self.store
            .find_by_id(id)
            .await
            .map(UserProfile::from)
            .ok_or(UserError::NotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateUserRequest,
    ) -> Result<UserProfile, UserError> {
        let mut user = self.store.find_by_id(id).await.ok_or(UserError::NotFound)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(plaintext) = changes.password {
            user.password_hash = password::hash(&plaintext).map_err(|_| UserError::Password)?;
        }
        user.updated_at = Utc::now();

        let updated = self.store.update(user).await?;
        Ok(UserProfile::from(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        self.store.delete(id).await?;
        Ok(())
    }
}
