//! Professional Application Service (Use Case)
//!
//! Orchestrates domain operations for practitioners and their
//! optional link to a staff account.

use std::sync::Arc;
use uuid::Uuid;

use cedin::{
    DomainError, Professional, ProfessionalRepository, ProfessionalStatus, UserRepository,
};

/// Profile fields of a Professional; `None` keeps the current value on update
#[derive(Debug, Default)]
pub struct ProfessionalChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialty: Option<String>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub color: Option<String>,
    pub status: Option<ProfessionalStatus>,
}

/// Application service for Professional operations
pub struct ProfessionalService {
    repo: Arc<dyn ProfessionalRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProfessionalService {
    pub fn new(repo: Arc<dyn ProfessionalRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { repo, users }
    }

    /// Get all Professionals
    pub async fn list_all(&self) -> Result<Vec<Professional>, DomainError> {
        self.repo.find_all().await
    }

    /// Get a Professional by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Professional>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Create a new Professional, optionally linked to a User
    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        profile: ProfessionalChanges,
        user_id: Option<Uuid>,
    ) -> Result<Professional, DomainError> {
        let professional = Professional {
            specialty: profile.specialty,
            registration_number: profile.registration_number,
            email: profile.email,
            phone: profile.phone,
            color: profile.color,
            status: profile.status.unwrap_or_default(),
            ..Professional::new(first_name, last_name)
        };
        professional.validate()?;

        if let Some(user_id) = user_id {
            self.ensure_linkable(professional.id, user_id).await?;
        }

        let saved = self
            .repo
            .save(&Professional {
                user_id,
                ..professional
            })
            .await?;

        tracing::info!("Created Professional: {} ({})", saved.full_name(), saved.id);

        Ok(saved)
    }

    /// Update a Professional's profile
    pub async fn update(
        &self,
        id: Uuid,
        changes: ProfessionalChanges,
    ) -> Result<Professional, DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Professional", id))?;

        let updated = Professional {
            first_name: changes
                .first_name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.first_name),
            last_name: changes
                .last_name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.last_name),
            specialty: changes.specialty.or(current.specialty),
            registration_number: changes.registration_number.or(current.registration_number),
            email: changes.email.or(current.email),
            phone: changes.phone.or(current.phone),
            color: changes.color.or(current.color),
            status: changes.status.unwrap_or(current.status),
            ..current
        };
        updated.validate()?;

        let saved = self.repo.save(&updated).await?;
        if saved.status == ProfessionalStatus::Inactive {
            tracing::info!("Professional {} is inactive", saved.id);
        }

        Ok(saved)
    }

    /// Delete a Professional with no appointments
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted Professional: {}", id);
        }
        Ok(deleted)
    }

    /// Link a User account to a Professional
    pub async fn link_user(
        &self,
        professional_id: Uuid,
        user_id: Uuid,
    ) -> Result<Professional, DomainError> {
        if self.repo.find_by_id(professional_id).await?.is_none() {
            return Err(DomainError::not_found("Professional", professional_id));
        }
        self.ensure_linkable(professional_id, user_id).await?;

        let linked = self.repo.link_user(professional_id, Some(user_id)).await?;
        tracing::info!("Linked User {} with Professional {}", user_id, professional_id);

        Ok(linked)
    }

    /// Remove the User link of a Professional
    pub async fn unlink_user(&self, professional_id: Uuid) -> Result<Professional, DomainError> {
        let unlinked = self.repo.link_user(professional_id, None).await?;
        tracing::info!("Unlinked User from Professional {}", professional_id);

        Ok(unlinked)
    }

    async fn ensure_linkable(
        &self,
        professional_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }

        match self.repo.find_by_user(user_id).await? {
            Some(other) if other.id != professional_id => Err(DomainError::conflict(format!(
                "User {} is already linked to professional {}",
                user_id,
                other.full_name()
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Repositories;
    use cedin::{Role, User};

    fn setup() -> (ProfessionalService, Arc<dyn UserRepository>) {
        let repos = Repositories::in_memory();
        let service = ProfessionalService::new(repos.professionals, repos.users.clone());
        (service, repos.users)
    }

    async fn staff(users: &Arc<dyn UserRepository>, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{}@cedin.com", username),
            "hash".to_string(),
            Role::Professional,
        );
        users.save(&user).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_with_profile() {
        let (service, _) = setup();
        let p = service
            .create(
                "Laura".to_string(),
                "Gómez".to_string(),
                ProfessionalChanges {
                    specialty: Some("Kinesiología".to_string()),
                    color: Some("bg-emerald-500".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(p.specialty.as_deref(), Some("Kinesiología"));
        assert_eq!(p.status, ProfessionalStatus::Active);
    }

    #[tokio::test]
    async fn test_link_requires_existing_user() {
        let (service, _) = setup();
        let p = service
            .create("Laura".to_string(), "Gómez".to_string(), Default::default(), None)
            .await
            .unwrap();

        let err = service.link_user(p.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_user_links_to_one_professional_only() {
        let (service, users) = setup();
        let laura = staff(&users, "laura").await;
        let first = service
            .create("Laura".to_string(), "Gómez".to_string(), Default::default(), Some(laura.id))
            .await
            .unwrap();
        let second = service
            .create("Pablo".to_string(), "Ruiz".to_string(), Default::default(), None)
            .await
            .unwrap();

        let err = service.link_user(second.id, laura.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Re-linking the same pair is a no-op
        let relinked = service.link_user(first.id, laura.id).await.unwrap();
        assert_eq!(relinked.user_id, Some(laura.id));
    }

    #[tokio::test]
    async fn test_unlink_then_link_elsewhere() {
        let (service, users) = setup();
        let laura = staff(&users, "laura").await;
        let first = service
            .create("Laura".to_string(), "Gómez".to_string(), Default::default(), Some(laura.id))
            .await
            .unwrap();
        let second = service
            .create("Pablo".to_string(), "Ruiz".to_string(), Default::default(), None)
            .await
            .unwrap();

        let unlinked = service.unlink_user(first.id).await.unwrap();
        assert!(unlinked.user_id.is_none());
        assert!(service.link_user(second.id, laura.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_profile_update_keeps_link() {
        let repos = Repositories::in_memory();
        let service = ProfessionalService::new(repos.professionals.clone(), repos.users.clone());
        let laura = staff(&repos.users, "laura").await;
        let p = service
            .create("Laura".to_string(), "Gómez".to_string(), Default::default(), None)
            .await
            .unwrap();
        service.link_user(p.id, laura.id).await.unwrap();

        // A profile write from a copy read before the link leaves it in place
        let stale = Professional {
            color: Some("#10b981".to_string()),
            ..p.clone()
        };
        let saved = repos.professionals.save(&stale).await.unwrap();
        assert_eq!(saved.user_id, Some(laura.id));

        let updated = service
            .update(
                p.id,
                ProfessionalChanges {
                    phone: Some("351 555 0101".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.user_id, Some(laura.id));
        assert_eq!(updated.color.as_deref(), Some("#10b981"));
    }

    #[tokio::test]
    async fn test_retire_by_status() {
        let (service, _) = setup();
        let p = service
            .create("Laura".to_string(), "Gómez".to_string(), Default::default(), None)
            .await
            .unwrap();

        let retired = service
            .update(
                p.id,
                ProfessionalChanges {
                    status: Some(ProfessionalStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!retired.is_active());
        assert_eq!(retired.first_name, "Laura");
    }
}
