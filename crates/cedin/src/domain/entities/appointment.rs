//! Appointment - A booked slot between a Patient and a Professional
//!
//! Pure domain entity without infrastructure dependencies.
//! The slot is the half-open interval `[date_time, date_time + duration)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields;
use crate::domain::{errors::DomainError, services::scheduling, value_objects::AppointmentStatus};

pub const DEFAULT_DURATION_MINUTES: i32 = 30;
pub const MIN_DURATION_MINUTES: i32 = 5;
pub const MAX_DURATION_MINUTES: i32 = 480;

/// Appointment - Scheduled event for one patient with one professional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    /// Free text kind of visit (consulta, tratamiento, ...)
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new scheduled Appointment with generated ID and timestamp
    pub fn new(
        patient_id: Uuid,
        professional_id: Uuid,
        date_time: DateTime<Utc>,
        duration_minutes: Option<i32>,
        appointment_type: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            professional_id,
            date_time,
            duration_minutes: duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            status: AppointmentStatus::Scheduled,
            appointment_type,
            notes,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(DomainError::validation(format!(
                "duration_minutes must be between {} and {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }
        fields::bounded("type", self.appointment_type.as_deref(), 50)
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.date_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Whether both slots share any instant; touching ends do not overlap
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.date_time < other.ends_at() && other.date_time < self.ends_at()
    }

    pub fn blocks_slot(&self) -> bool {
        self.status.blocks_slot()
    }

    /// Apply a status change allowed by the transition table
    pub fn transition_to(&mut self, next: AppointmentStatus) -> Result<(), DomainError> {
        scheduling::ensure_transition(self.status, next)?;
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, duration: i32) -> Appointment {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap();
        Appointment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            start,
            Some(duration),
            None,
            None,
        )
    }

    #[test]
    fn test_default_duration() {
        let a = Appointment::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now(), None, None, None);
        assert_eq!(a.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(a.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_overlap() {
        let a = at(10, 0, 30);
        assert!(a.overlaps(&at(10, 15, 30)));
        assert!(a.overlaps(&at(9, 45, 30)));
        assert!(a.overlaps(&at(9, 0, 120)));
    }

    #[test]
    fn test_adjacent_slots_do_not_overlap() {
        let a = at(10, 0, 30);
        assert!(!a.overlaps(&at(10, 30, 30)));
        assert!(!a.overlaps(&at(9, 30, 30)));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(at(10, 0, MIN_DURATION_MINUTES - 1).validate().is_err());
        assert!(at(10, 0, MAX_DURATION_MINUTES + 1).validate().is_err());
        assert!(at(10, 0, 45).validate().is_ok());
    }

    #[test]
    fn test_transition_rejected_keeps_status() {
        let mut a = at(10, 0, 30);
        a.transition_to(AppointmentStatus::Cancelled).unwrap();
        let err = a.transition_to(AppointmentStatus::Confirmed).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(a.status, AppointmentStatus::Cancelled);
    }
}
