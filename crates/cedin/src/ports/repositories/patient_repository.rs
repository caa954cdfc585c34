//! Patient Repository Port
//!
//! Abstract interface for Patient persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Patient};

/// Repository interface for Patient entities
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Find a Patient by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError>;

    /// Find all Patients
    async fn find_all(&self) -> Result<Vec<Patient>, DomainError>;

    async fn find_by_dni(&self, dni: &str) -> Result<Option<Patient>, DomainError>;

    /// Save a Patient (insert or update); a duplicate DNI is a `Conflict`
    async fn save(&self, patient: &Patient) -> Result<Patient, DomainError>;

    /// Delete a Patient by ID
    ///
    /// Fails with `DomainError::Conflict` while any appointment references it.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
