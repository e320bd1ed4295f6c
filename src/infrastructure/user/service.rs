//! User registration and authentication

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{validate_password, validate_username, User, UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Registers and authenticates users over any repository backend
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Creates a user with a fresh id
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.find_by_username(username).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(UserId::generate(), username, password_hash);

        // The repository re-checks the username, which settles concurrent registrations.
        self.repository.save(&user).await?;

        info!(user_id = %user.id(), username, "User registered");
        Ok(user)
    }

    /// Returns the user when the credentials match an active account
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(mut user) = self.repository.find_by_username(username).await? else {
            return Ok(None);
        };

        if !user.is_active() || !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        user.record_login();
        self.repository.save(&user).await?;

        Ok(Some(user))
    }

    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.find_by_id(&user_id).await
    }
}
