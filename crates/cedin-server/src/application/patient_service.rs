//! Patient Application Service (Use Case)

use std::sync::Arc;
use uuid::Uuid;

use chrono::NaiveDate;
use cedin::{DomainError, Patient, PatientRepository};

/// Partial update of a Patient; `None` keeps the current value
#[derive(Debug, Default)]
pub struct PatientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Application service for Patient operations
pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Patient>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Register a new Patient; the DNI must be unused
    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        dni: String,
        email: Option<String>,
        phone: Option<String>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Patient, DomainError> {
        let patient = Patient {
            email,
            phone,
            birth_date,
            ..Patient::new(first_name, last_name, dni)
        };
        patient.validate()?;
        self.ensure_unique_dni(&patient).await?;

        let saved = self.repo.save(&patient).await?;
        tracing::info!("Created Patient: {} ({})", saved.full_name(), saved.id);

        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, changes: PatientChanges) -> Result<Patient, DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", id))?;

        let updated = Patient {
            first_name: changes
                .first_name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.first_name),
            last_name: changes
                .last_name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.last_name),
            dni: changes
                .dni
                .map(|d| d.trim().to_string())
                .unwrap_or(current.dni),
            email: changes.email.or(current.email),
            phone: changes.phone.or(current.phone),
            birth_date: changes.birth_date.or(current.birth_date),
            ..current
        };
        updated.validate()?;
        self.ensure_unique_dni(&updated).await?;

        self.repo.save(&updated).await
    }

    /// Delete a Patient with no appointments
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted Patient: {}", id);
        }
        Ok(deleted)
    }

    async fn ensure_unique_dni(&self, patient: &Patient) -> Result<(), DomainError> {
        match self.repo.find_by_dni(&patient.dni).await? {
            Some(other) if other.id != patient.id => Err(DomainError::conflict(format!(
                "A patient with DNI '{}' already exists",
                patient.dni
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Repositories;

    fn service() -> PatientService {
        PatientService::new(Repositories::in_memory().patients)
    }

    async fn register(service: &PatientService, dni: &str) -> Result<Patient, DomainError> {
        service
            .create(
                "Juan".to_string(),
                "Pérez".to_string(),
                dni.to_string(),
                None,
                None,
                NaiveDate::from_ymd_opt(1985, 2, 1),
            )
            .await
    }

    #[tokio::test]
    async fn test_duplicate_dni_fails() {
        let service = service();
        register(&service, "30111222").await.unwrap();

        let err = register(&service, " 30111222 ").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let service = service();
        let juan = register(&service, "30111222").await.unwrap();

        let updated = service
            .update(
                juan.id,
                PatientChanges {
                    phone: Some("+54 11 5555-0000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.dni, "30111222");
        assert_eq!(updated.birth_date, juan.birth_date);
        assert_eq!(updated.phone.as_deref(), Some("+54 11 5555-0000"));
    }

    #[tokio::test]
    async fn test_update_to_taken_dni_fails() {
        let service = service();
        register(&service, "30111222").await.unwrap();
        let other = register(&service, "28999000").await.unwrap();

        let err = service
            .update(
                other.id,
                PatientChanges {
                    dni: Some("30111222".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_patient() {
        let err = service()
            .update(Uuid::new_v4(), PatientChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
