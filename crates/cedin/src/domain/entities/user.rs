//! User - Staff account
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields;
use crate::domain::{errors::DomainError, value_objects::Role};

pub const USERNAME_MAX_LEN: usize = 64;

/// User - Identity record for clinic staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active User with generated ID and timestamp
    pub fn new(username: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password_hash,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        fields::required("username", &self.username, USERNAME_MAX_LEN)?;
        fields::required("email", &self.email, 120)?;
        fields::email("email", Some(&self.email))
    }

    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}
