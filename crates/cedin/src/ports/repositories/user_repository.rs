//! User Repository Port
//!
//! Abstract interface for User persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, User};

/// Repository interface for User entities
///
/// `save` must reject a username or email (case-insensitive) already held by
/// another user with `DomainError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a User by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find all Users
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Email lookup is case-insensitive
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Save a User (insert or update)
    async fn save(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a User by ID, unlinking its Professional if any
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
