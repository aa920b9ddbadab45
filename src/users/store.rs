//! Persistence boundary for user records.
//!
//! The service layer only sees the [`UserStore`] trait; the shipped
//! implementation is an in-process map. A relational backend slots in
//! behind the same trait without touching the services.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::model::User;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User not found")]
    NotFound,

    #[error("Email is already in use")]
    EmailTaken,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: User) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_id(&self, id: Uuid) -> Option<User>;
    /// Replace the record with `user.id`; fails if it does not exist or the
    /// new email belongs to a different record.
    async fn update(&self, user: User) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn list(&self) -> Vec<User>;
}

/// In-process user store backed by concurrent maps.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// email -> id index enforcing email uniqueness.
    emails: DashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        // The email index entry doubles as the uniqueness lock: entry() holds
        // the shard lock while we decide whether the address is free.
        match self.emails.entry(user.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::EmailTaken),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.emails.get(email)?;
        self.users.get(&id).map(|u| u.value().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let previous = self
            .users
            .get(&user.id)
            .map(|u| u.value().clone())
            .ok_or(StoreError::NotFound)?;

        if user.email != previous.email {
            if self.emails.contains_key(&user.email) {
                return Err(StoreError::EmailTaken);
            }
            self.emails.remove(&previous.email);
            self.emails.insert(user.email.clone(), user.id);
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let (_, user) = self.users.remove(&id).ok_or(StoreError::NotFound)?;
        self.emails.remove(&user.email);
        Ok(())
    }

    async fn list(&self) -> Vec<User> {
        self.users.iter().map(|u| u.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::model::Role;

    fn sample(email: &str) -> User {
        User::new(
            "Ada".to_string(),
            email.to_string(),
            "hash".to_string(),
            Role::User,
        )
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create(sample("a@example.com")).await.unwrap();
        let err = store.create(sample("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn update_moves_email_index() {
        let store = MemoryStore::new();
        let mut user = store.create(sample("a@example.com")).await.unwrap();
        user.email = "b@example.com".to_string();
        store.update(user.clone()).await.unwrap();

        assert!(store.find_by_email("a@example.com").await.is_none());
        assert_eq!(
            store.find_by_email("b@example.com").await.unwrap().id,
            user.id
        );
    }

    #[tokio::test]
    async fn delete_frees_the_email() {
        let store = MemoryStore::new();
        let user = store.create(sample("a@example.com")).await.unwrap();
        store.delete(user.id).await.unwrap();

        assert!(store.find_by_id(user.id).await.is_none());
        assert!(store.create(sample("a@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
