//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Keyed user storage.
///
/// Backends are interchangeable; callers only see these three operations.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Inserts or replaces a user by id.
    ///
    /// Fails with `Conflict` when another user already holds the username.
    async fn save(&self, user: &User) -> Result<(), DomainError>;
}
