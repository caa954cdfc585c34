//! Patient DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cedin::Patient;

use crate::application::PatientChanges;

/// Create Patient request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    /// National identity document number
    pub dni: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Update Patient request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl From<UpdatePatientRequest> for PatientChanges {
    fn from(req: UpdatePatientRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            dni: req.dni,
            email: req.email,
            phone: req.phone,
            birth_date: req.birth_date,
        }
    }
}

/// Patient response
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            dni: p.dni,
            email: p.email,
            phone: p.phone,
            birth_date: p.birth_date,
            created_at: p.created_at,
        }
    }
}
