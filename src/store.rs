//! User storage boundary.
//!
//! Handlers only see the [`UserStore`] trait. The service ships with
//! [`MemoryUserStore`]; a relational backend plugs in behind the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored user as returned to API clients.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email is required")]
    InvalidEmail,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, email: &str) -> Result<User, StoreError>;

    async fn delete_all_users(&self) -> Result<(), StoreError>;
}

/// Process-local store. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str) -> Result<User, StoreError> {
        if email.trim().is_empty() {
            return Err(StoreError::InvalidEmail);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_owned(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn delete_all_users(&self) -> Result<(), StoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = MemoryUserStore::new();
        let a = store.create_user("a@example.com").await.unwrap();
        let b = store.create_user("b@example.com").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.email, "a@example.com");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let store = MemoryUserStore::new();
        assert!(matches!(store.create_user("  ").await, Err(StoreError::InvalidEmail)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_all_empties_the_store() {
        let store = MemoryUserStore::new();
        store.create_user("a@example.com").await.unwrap();
        store.delete_all_users().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[test]
    fn user_serialises_with_snake_case_fields() {
        let user = User {
            id: Uuid::nil(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
            email: "a@example.com".into(),
        };
        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(v["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(v["created_at"], "1970-01-01T00:00:00Z");
        assert_eq!(v["email"], "a@example.com");
    }
}
