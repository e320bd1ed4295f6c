//! In-memory user repository

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Users keyed by id plus a username index, both behind one lock
#[derive(Debug, Clone, Default)]
pub(super) struct UserIndex {
    users: HashMap<UserId, User>,
    usernames: HashMap<String, UserId>,
}

impl UserIndex {
    pub(super) fn from_users(users: impl IntoIterator<Item = User>) -> Result<Self, DomainError> {
        let mut index = Self::default();
        for user in users {
            index.insert(user)?;
        }
        Ok(index)
    }

    pub(super) fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub(super) fn get_by_username(&self, username: &str) -> Option<&User> {
        self.usernames.get(username).and_then(|id| self.users.get(id))
    }

    pub(super) fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Inserts or replaces by id, keeping the username index in step
    pub(super) fn insert(&mut self, user: User) -> Result<(), DomainError> {
        if let Some(holder) = self.usernames.get(user.username()) {
            if holder != user.id() {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }
        }

        if let Some(previous) = self.users.get(user.id()) {
            if previous.username() != user.username() {
                self.usernames.remove(previous.username());
            }
        }

        self.usernames
            .insert(user.username().to_string(), user.id().clone());
        self.users.insert(user.id().clone(), user);
        Ok(())
    }
}

/// Process-local user store
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    index: RwLock<UserIndex>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Result<Self, DomainError> {
        Ok(Self {
            index: RwLock::new(UserIndex::from_users(users)?),
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.index.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.index.read().await.get_by_username(username).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.index.write().await.insert(user.clone())
    }
}
