//! Appointment Repository Port
//!
//! Abstract interface for Appointment persistence operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{errors::DomainError, Appointment, AppointmentStatus};

/// Listing filter for appointment queries
#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    pub professional_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    /// Appointments starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Appointments starting before this instant
    pub to: Option<DateTime<Utc>>,
}

impl AppointmentFilter {
    pub fn for_professional(professional_id: Uuid) -> Self {
        Self {
            professional_id: Some(professional_id),
            ..Default::default()
        }
    }

    pub fn for_patient(patient_id: Uuid) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.professional_id
            .map_or(true, |id| appointment.professional_id == id)
            && self.patient_id.map_or(true, |id| appointment.patient_id == id)
            && self.status.map_or(true, |s| appointment.status == s)
            && self.from.map_or(true, |from| appointment.date_time >= from)
            && self.to.map_or(true, |to| appointment.date_time < to)
    }
}

/// Repository interface for Appointment entities
///
/// `book` and `update` check for double-booking and write in one atomic
/// step; two concurrent requests for overlapping slots of the same
/// professional must never both succeed.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find an Appointment by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError>;

    /// Find Appointments matching a filter, ordered by start time
    async fn find_all(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>, DomainError>;

    /// Insert a new Appointment if its slot is free
    ///
    /// A missing patient or professional is a `DomainError::NotFound`,
    /// an overlapping slot is a `DomainError::Conflict`.
    async fn book(&self, appointment: &Appointment) -> Result<Appointment, DomainError>;

    /// Update the slot, type and notes of an Appointment, re-checking its slot
    ///
    /// The stored status is never written here. `appointment.status` is the
    /// status the caller read; if the stored one differs the update fails
    /// with `DomainError::Conflict`.
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DomainError>;

    /// Move an Appointment from status `from` to `to`
    ///
    /// Fails with `DomainError::Conflict` if the stored status is no longer
    /// `from`, so two racing changes cannot both apply.
    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Appointment, DomainError>;
}
