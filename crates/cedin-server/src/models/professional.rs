//! Professional - Practitioner DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cedin::{Professional, ProfessionalStatus};

use crate::application::ProfessionalChanges;

/// Create Professional request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfessionalRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialty: Option<String>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Tailwind class or hex colour
    pub color: Option<String>,
    #[schema(value_type = Option<String>, example = "active")]
    pub status: Option<ProfessionalStatus>,
    /// Staff account to link
    pub user_id: Option<Uuid>,
}

/// Update Professional request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfessionalRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialty: Option<String>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<String>, example = "inactive")]
    pub status: Option<ProfessionalStatus>,
}

impl From<UpdateProfessionalRequest> for ProfessionalChanges {
    fn from(req: UpdateProfessionalRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            specialty: req.specialty,
            registration_number: req.registration_number,
            email: req.email,
            phone: req.phone,
            color: req.color,
            status: req.status,
        }
    }
}

/// Link User to Professional request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkUserRequest {
    pub user_id: Uuid,
}

/// Professional response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessionalResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialty: Option<String>,
    pub registration_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = String, example = "active")]
    pub status: ProfessionalStatus,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Professional> for ProfessionalResponse {
    fn from(p: Professional) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            specialty: p.specialty,
            registration_number: p.registration_number,
            email: p.email,
            phone: p.phone,
            color: p.color,
            status: p.status,
            user_id: p.user_id,
            created_at: p.created_at,
        }
    }
}
