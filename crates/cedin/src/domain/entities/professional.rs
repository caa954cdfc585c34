//! Professional - Practitioner profile
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields;
use crate::domain::{errors::DomainError, value_objects::ProfessionalStatus};

/// Professional - A practitioner who owns a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialty: Option<String>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Tailwind class or hex colour used by the agenda
    pub color: Option<String>,
    pub status: ProfessionalStatus,
    /// Linked staff account, unique across professionals
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Professional {
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            specialty: None,
            registration_number: None,
            email: None,
            phone: None,
            color: None,
            status: ProfessionalStatus::Active,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        fields::required("first_name", &self.first_name, 64)?;
        fields::required("last_name", &self.last_name, 64)?;
        fields::bounded("specialty", self.specialty.as_deref(), 64)?;
        fields::bounded(
            "registration_number",
            self.registration_number.as_deref(),
            32,
        )?;
        fields::email("email", self.email.as_deref())?;
        fields::bounded("phone", self.phone.as_deref(), 32)?;
        fields::bounded("color", self.color.as_deref(), 64)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == ProfessionalStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_professional_defaults() {
        let p = Professional::new("Laura".to_string(), " Gómez ".to_string());
        assert_eq!(p.full_name(), "Laura Gómez");
        assert!(p.is_active());
        assert!(p.user_id.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_requires_names() {
        let p = Professional::new("".to_string(), "Gómez".to_string());
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_optional_email_checked_when_present() {
        let mut p = Professional::new("Laura".to_string(), "Gómez".to_string());
        p.email = Some("not-an-email".to_string());
        assert!(p.validate().is_err());
    }
}
