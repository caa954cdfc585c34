//! User Application Service (Use Case)
//!
//! Orchestrates domain operations for staff accounts.

use std::sync::Arc;
use uuid::Uuid;

use cedin::{DomainError, Professional, ProfessionalRepository, Role, User, UserRepository};

use crate::password::PasswordService;

/// Partial update of a User; `None` keeps the current value
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// Application service for User operations
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    professionals: Arc<dyn ProfessionalRepository>,
    passwords: PasswordService,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        professionals: Arc<dyn ProfessionalRepository>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            repo,
            professionals,
            passwords,
        }
    }

    /// Get all Users with their linked Professional
    pub async fn list_all(&self) -> Result<Vec<(User, Option<Professional>)>, DomainError> {
        let users = self.repo.find_all().await?;
        let mut results = Vec::with_capacity(users.len());

        for user in users {
            let professional = self.professionals.find_by_user(user.id).await?;
            results.push((user, professional));
        }

        Ok(results)
    }

    /// Get a User by ID with its linked Professional
    pub async fn get_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Option<Professional>)>, DomainError> {
        let user = match self.repo.find_by_id(id).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let professional = self.professionals.find_by_user(user.id).await?;

        Ok(Some((user, professional)))
    }

    /// Create a new User; username and email must be unused
    pub async fn create(
        &self,
        username: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<User, DomainError> {
        let user = User::new(username, email, String::new(), role);
        user.validate()?;
        self.ensure_unique(&user).await?;

        let user = User {
            password_hash: self.passwords.hash(password)?,
            ..user
        };
        let saved = self.repo.save(&user).await?;
        tracing::info!("Created User: {} ({}) - {}", saved.username, saved.id, saved.role);

        Ok(saved)
    }

    /// Update a User, returning it with its linked Professional
    pub async fn update(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<(User, Option<Professional>), DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let updated = User {
            username: changes
                .username
                .map(|u| u.trim().to_string())
                .unwrap_or(current.username),
            email: changes
                .email
                .map(|e| e.trim().to_string())
                .unwrap_or(current.email),
            role: changes.role.unwrap_or(current.role),
            is_active: changes.is_active.unwrap_or(current.is_active),
            ..current
        };
        updated.validate()?;
        self.ensure_unique(&updated).await?;

        let updated = match changes.password.as_deref() {
            Some(password) => User {
                password_hash: self.passwords.hash(password)?,
                ..updated
            },
            None => updated,
        };
        let saved = self.repo.save(&updated).await?;
        let professional = self.professionals.find_by_user(saved.id).await?;
        tracing::info!("Updated User: {} ({})", saved.username, saved.id);

        Ok((saved, professional))
    }

    /// Delete a User; a linked Professional is kept and unlinked
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted User: {}", id);
        }
        Ok(deleted)
    }

    async fn ensure_unique(&self, user: &User) -> Result<(), DomainError> {
        if let Some(other) = self.repo.find_by_username(&user.username).await? {
            if other.id != user.id {
                return Err(DomainError::conflict(format!(
                    "Username '{}' is already taken",
                    user.username
                )));
            }
        }
        if let Some(other) = self.repo.find_by_email(&user.email).await? {
            if other.id != user.id {
                return Err(DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    user.email
                )));
            }
        }
        Ok(())
    }
}
