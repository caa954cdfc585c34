//! Appointment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use cedin::{Appointment, AppointmentFilter, AppointmentStatus};

use crate::application::{NewAppointment, RescheduleAppointment};

/// Book Appointment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date_time: DateTime<Utc>,
    /// Defaults to 30
    pub duration_minutes: Option<i32>,
    #[serde(rename = "type")]
    #[schema(example = "consulta")]
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateAppointmentRequest> for NewAppointment {
    fn from(req: CreateAppointmentRequest) -> Self {
        Self {
            patient_id: req.patient_id,
            professional_id: req.professional_id,
            date_time: req.date_time,
            duration_minutes: req.duration_minutes,
            appointment_type: req.appointment_type,
            notes: req.notes,
        }
    }
}

/// Reschedule / edit Appointment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub date_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateAppointmentRequest> for RescheduleAppointment {
    fn from(req: UpdateAppointmentRequest) -> Self {
        Self {
            date_time: req.date_time,
            duration_minutes: req.duration_minutes,
            appointment_type: req.appointment_type,
            notes: req.notes,
        }
    }
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentStatusRequest {
    #[schema(value_type = String, example = "confirmed")]
    pub status: AppointmentStatus,
}

/// Appointment listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentQuery {
    pub professional_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    #[param(value_type = Option<String>, example = "scheduled")]
    pub status: Option<AppointmentStatus>,
    /// Start time lower bound (inclusive)
    pub from: Option<DateTime<Utc>>,
    /// Start time upper bound (exclusive)
    pub to: Option<DateTime<Utc>>,
}

impl From<AppointmentQuery> for AppointmentFilter {
    fn from(q: AppointmentQuery) -> Self {
        Self {
            professional_id: q.professional_id,
            patient_id: q.patient_id,
            status: q.status,
            from: q.from,
            to: q.to,
        }
    }
}

/// Appointment response
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[schema(value_type = String, example = "scheduled")]
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            ends_at: a.ends_at(),
            id: a.id,
            patient_id: a.patient_id,
            professional_id: a.professional_id,
            date_time: a.date_time,
            duration_minutes: a.duration_minutes,
            status: a.status,
            appointment_type: a.appointment_type,
            notes: a.notes,
            created_at: a.created_at,
        }
    }
}
