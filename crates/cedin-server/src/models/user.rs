//! User - Staff account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cedin::{Professional, Role, User};

/// Create User request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    #[schema(value_type = String, example = "SECRETARY")]
    pub role: Role,
}

/// Update User request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(value_type = Option<String>, example = "ADMIN")]
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// User response (never carries the password hash)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[schema(value_type = String, example = "SECRETARY")]
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Linked professional profile, if any
    pub professional_id: Option<Uuid>,
}

impl From<(User, Option<Professional>)> for UserResponse {
    fn from((user, professional): (User, Option<Professional>)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login: user.last_login,
            professional_id: professional.map(|p| p.id),
        }
    }
}
