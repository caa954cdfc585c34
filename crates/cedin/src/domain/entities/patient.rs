//! Patient - Care recipient identified by DNI

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields;
use crate::domain::errors::DomainError;

pub const DNI_MAX_LEN: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// National identity document number, unique across patients
    pub dni: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(first_name: String, last_name: String, dni: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            dni: dni.trim().to_string(),
            email: None,
            phone: None,
            birth_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        fields::required("first_name", &self.first_name, 64)?;
        fields::required("last_name", &self.last_name, 64)?;
        fields::required("dni", &self.dni, DNI_MAX_LEN)?;
        fields::email("email", self.email.as_deref())?;
        fields::bounded("phone", self.phone.as_deref(), 32)?;

        if let Some(birth_date) = self.birth_date {
            if birth_date > Utc::now().date_naive() {
                return Err(DomainError::validation("birth_date is in the future"));
            }
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn patient(dni: &str) -> Patient {
        Patient::new("Juan".to_string(), "Pérez".to_string(), dni.to_string())
    }

    #[test]
    fn test_dni_is_trimmed_and_required() {
        assert_eq!(patient(" 30111222 ").dni, "30111222");
        assert!(patient("   ").validate().is_err());
    }

    #[test]
    fn test_dni_length() {
        assert!(patient(&"9".repeat(DNI_MAX_LEN)).validate().is_ok());
        assert!(patient(&"9".repeat(DNI_MAX_LEN + 1)).validate().is_err());
    }

    #[test]
    fn test_birth_date_not_in_future() {
        let mut p = patient("30111222");
        p.birth_date = Some(Utc::now().date_naive() + Duration::days(2));
        assert!(p.validate().is_err());

        p.birth_date = NaiveDate::from_ymd_opt(1990, 5, 17);
        assert!(p.validate().is_ok());
    }
}
