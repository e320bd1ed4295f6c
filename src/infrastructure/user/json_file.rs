//! User repository persisted as a single JSON document keyed by user id

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::in_memory::UserIndex;
use crate::domain::user::{User, UserId, UserRepository, UserStatus};
use crate::domain::DomainError;

/// On-disk shape of a user, including the password hash
#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    username: String,
    password_hash: String,
    #[serde(default)]
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            username: user.username().to_string(),
            password_hash: user.password_hash().to_string(),
            status: user.status(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
            last_login_at: user.last_login_at(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User::restore(
            record.id,
            record.username,
            record.password_hash,
            record.status,
            record.created_at,
            record.updated_at,
            record.last_login_at,
        )
    }
}

/// File-backed user store.
///
/// The whole store is held in memory and every `save` rewrites the file
/// through a temp file and rename. The in-memory view changes only after
/// the write succeeds.
#[derive(Debug)]
pub struct JsonFileUserRepository {
    path: PathBuf,
    index: RwLock<UserIndex>,
}

impl JsonFileUserRepository {
    /// Loads the store from `path`; a missing file is an empty store
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let records: BTreeMap<String, UserRecord> = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                DomainError::storage(format!(
                    "Failed to parse user store '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read user store '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        debug!(path = %path.display(), users = records.len(), "Loaded user store");

        let index = UserIndex::from_users(records.into_values().map(User::from))?;

        Ok(Self {
            path,
            index: RwLock::new(index),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, index: &UserIndex) -> Result<(), DomainError> {
        let records: BTreeMap<&str, UserRecord> = index
            .users()
            .map(|user| (user.id().as_str(), UserRecord::from(user)))
            .collect();

        let data = serde_json::to_vec_pretty(&records)
            .map_err(|e| DomainError::storage(format!("Failed to serialize users: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&temp_path, &data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DomainError::storage(format!(
                "Failed to write '{}': {}",
                temp_path.display(),
                e
            )));
        }

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.index.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.index.read().await.get_by_username(username).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut index = self.index.write().await;

        let mut updated = index.clone();
        updated.insert(user.clone())?;
        self.persist(&updated).await?;

        *index = updated;
        Ok(())
    }
}
