//! Professional Repository Port
//!
//! Abstract interface for Professional persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Professional};

/// Repository interface for Professional entities
#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    /// Find a Professional by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professional>, DomainError>;

    /// Find all Professionals
    async fn find_all(&self) -> Result<Vec<Professional>, DomainError>;

    /// Find the Professional linked to a User
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Professional>, DomainError>;

    /// Save a Professional (insert or update)
    ///
    /// `user_id` is only written when the Professional is inserted; an
    /// update keeps the stored link, which changes through `link_user`.
    async fn save(&self, professional: &Professional) -> Result<Professional, DomainError>;

    /// Delete a Professional by ID
    ///
    /// Fails with `DomainError::Conflict` while any appointment references it.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Set or clear the linked User
    ///
    /// Fails with `DomainError::Conflict` if the User is already linked to
    /// another Professional.
    async fn link_user(
        &self,
        professional_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Professional, DomainError>;
}
