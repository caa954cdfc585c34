//! Appointment Application Service (Use Case)
//!
//! Booking, rescheduling and status changes. The double-booking check
//! itself runs inside the repository so that it shares a transaction
//! with the write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cedin::domain::services::scheduling;
use cedin::{
    Appointment, AppointmentFilter, AppointmentRepository, AppointmentStatus, DomainError,
    PatientRepository, ProfessionalRepository,
};

/// Booking request
#[derive(Debug)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
}

/// Changes to an existing booking; `None` keeps the current value
#[derive(Debug, Default)]
pub struct RescheduleAppointment {
    pub date_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub appointment_type: Option<String>,
    pub notes: Option<String>,
}

/// Application service for Appointment operations
pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    professionals: Arc<dyn ProfessionalRepository>,
}

impl AppointmentService {
    pub fn new(
        repo: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        professionals: Arc<dyn ProfessionalRepository>,
    ) -> Self {
        Self {
            repo,
            patients,
            professionals,
        }
    }

    pub async fn list(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>, DomainError> {
        self.repo.find_all(filter).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Appointments of a Professional; the Professional must exist
    pub async fn list_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, DomainError> {
        if self.professionals.find_by_id(professional_id).await?.is_none() {
            return Err(DomainError::not_found("Professional", professional_id));
        }
        self.repo
            .find_all(AppointmentFilter::for_professional(professional_id))
            .await
    }

    /// Appointments of a Patient; the Patient must exist
    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, DomainError> {
        if self.patients.find_by_id(patient_id).await?.is_none() {
            return Err(DomainError::not_found("Patient", patient_id));
        }
        self.repo
            .find_all(AppointmentFilter::for_patient(patient_id))
            .await
    }

    /// Book a new appointment
    pub async fn book(&self, request: NewAppointment) -> Result<Appointment, DomainError> {
        let appointment = Appointment::new(
            request.patient_id,
            request.professional_id,
            request.date_time,
            request.duration_minutes,
            request.appointment_type,
            request.notes,
        );
        appointment.validate()?;

        if self.patients.find_by_id(appointment.patient_id).await?.is_none() {
            return Err(DomainError::not_found("Patient", appointment.patient_id));
        }
        let professional = self
            .professionals
            .find_by_id(appointment.professional_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Professional", appointment.professional_id))?;
        scheduling::ensure_bookable(&professional)?;

        let booked = self.repo.book(&appointment).await.inspect_err(|e| {
            if let DomainError::Conflict(reason) = e {
                tracing::warn!("Rejected booking for {}: {}", professional.full_name(), reason);
            }
        })?;

        tracing::info!(
            "Booked Appointment {} with {} at {}",
            booked.id,
            professional.full_name(),
            booked.date_time
        );

        Ok(booked)
    }

    /// Move or edit a booking that is still open
    pub async fn reschedule(
        &self,
        id: Uuid,
        changes: RescheduleAppointment,
    ) -> Result<Appointment, DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;

        let moves_slot = changes.date_time.is_some() || changes.duration_minutes.is_some();
        if moves_slot && current.status.is_terminal() {
            return Err(DomainError::validation(format!(
                "A {} appointment cannot be rescheduled",
                current.status
            )));
        }

        // Status stays as read; the repository rejects the edit if it changed since
        let updated = Appointment {
            date_time: changes.date_time.unwrap_or(current.date_time),
            duration_minutes: changes.duration_minutes.unwrap_or(current.duration_minutes),
            appointment_type: changes.appointment_type.or(current.appointment_type),
            notes: changes.notes.or(current.notes),
            ..current
        };
        updated.validate()?;

        let saved = self.repo.update(&updated).await?;
        if moves_slot {
            tracing::info!("Rescheduled Appointment {} to {}", saved.id, saved.date_time);
        }

        Ok(saved)
    }

    /// Apply a status transition
    pub async fn change_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, DomainError> {
        let mut appointment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;

        let previous = appointment.status;
        appointment.transition_to(status)?;

        let saved = self
            .repo
            .update_status(id, previous, appointment.status)
            .await?;
        tracing::info!("Appointment {}: {} -> {}", saved.id, previous, saved.status);

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Repositories;
    use cedin::{Patient, Professional, ProfessionalStatus};
    use chrono::{Duration, TimeZone};

    struct Fixture {
        service: AppointmentService,
        repos: Repositories,
        patient: Patient,
        professional: Professional,
    }

    async fn fixture() -> Fixture {
        let repos = Repositories::in_memory();
        let patient = repos
            .patients
            .save(&Patient::new(
                "Juan".to_string(),
                "Pérez".to_string(),
                "30111222".to_string(),
            ))
            .await
            .unwrap();
        let professional = repos
            .professionals
            .save(&Professional::new("Laura".to_string(), "Gómez".to_string()))
            .await
            .unwrap();
        let service = AppointmentService::new(
            repos.appointments.clone(),
            repos.patients.clone(),
            repos.professionals.clone(),
        );

        Fixture {
            service,
            repos,
            patient,
            professional,
        }
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    impl Fixture {
        fn request(&self, date_time: DateTime<Utc>) -> NewAppointment {
            NewAppointment {
                patient_id: self.patient.id,
                professional_id: self.professional.id,
                date_time,
                duration_minutes: Some(30),
                appointment_type: Some("consulta".to_string()),
                notes: None,
            }
        }
    }

    #[tokio::test]
    async fn test_book_and_list() {
        let f = fixture().await;
        let booked = f.service.book(f.request(nine_am())).await.unwrap();
        assert_eq!(booked.status, AppointmentStatus::Scheduled);

        let for_patient = f.service.list_for_patient(f.patient.id).await.unwrap();
        assert_eq!(for_patient.len(), 1);
        assert_eq!(for_patient[0].id, booked.id);
    }

    #[tokio::test]
    async fn test_nonexistent_references_rejected() {
        let f = fixture().await;

        let mut request = f.request(nine_am());
        request.patient_id = Uuid::new_v4();
        assert!(matches!(
            f.service.book(request).await,
            Err(DomainError::NotFound { .. })
        ));

        let mut request = f.request(nine_am());
        request.professional_id = Uuid::new_v4();
        assert!(matches!(
            f.service.book(request).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_double_booking_rejected() {
        let f = fixture().await;
        f.service.book(f.request(nine_am())).await.unwrap();

        let overlapping = f.request(nine_am() + Duration::minutes(15));
        assert!(matches!(
            f.service.book(overlapping).await,
            Err(DomainError::Conflict(_))
        ));

        let adjacent = f.request(nine_am() + Duration::minutes(30));
        assert!(f.service.book(adjacent).await.is_ok());
    }

    #[tokio::test]
    async fn test_inactive_professional_rejects_bookings() {
        let f = fixture().await;
        f.repos
            .professionals
            .save(&Professional {
                status: ProfessionalStatus::Inactive,
                ..f.professional.clone()
            })
            .await
            .unwrap();

        assert!(matches!(
            f.service.book(f.request(nine_am())).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let f = fixture().await;
        let booked = f.service.book(f.request(nine_am())).await.unwrap();

        let confirmed = f
            .service
            .change_status(booked.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let completed = f
            .service
            .change_status(booked.id, AppointmentStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);

        let err = f
            .service
            .change_status(booked.id, AppointmentStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_cancel_frees_slot() {
        let f = fixture().await;
        let booked = f.service.book(f.request(nine_am())).await.unwrap();
        f.service
            .change_status(booked.id, AppointmentStatus::Cancelled)
            .await
            .unwrap();

        assert!(f.service.book(f.request(nine_am())).await.is_ok());
    }

    #[tokio::test]
    async fn test_reschedule_checks_conflicts() {
        let f = fixture().await;
        f.service.book(f.request(nine_am())).await.unwrap();
        let later = f
            .service
            .book(f.request(nine_am() + Duration::hours(1)))
            .await
            .unwrap();

        let err = f
            .service
            .reschedule(
                later.id,
                RescheduleAppointment {
                    date_time: Some(nine_am() + Duration::minutes(10)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Extending in place does not clash with itself
        let extended = f
            .service
            .reschedule(
                later.id,
                RescheduleAppointment {
                    duration_minutes: Some(60),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(extended.duration_minutes, 60);
    }

    #[tokio::test]
    async fn test_cannot_reschedule_cancelled() {
        let f = fixture().await;
        let booked = f.service.book(f.request(nine_am())).await.unwrap();
        f.service
            .change_status(booked.id, AppointmentStatus::Cancelled)
            .await
            .unwrap();

        let err = f
            .service
            .reschedule(
                booked.id,
                RescheduleAppointment {
                    date_time: Some(nine_am() + Duration::hours(2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_racing_status_changes_apply_once() {
        let f = fixture().await;
        let booked = f.service.book(f.request(nine_am())).await.unwrap();
        f.service
            .change_status(booked.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();

        let id = booked.id;
        let service = Arc::new(f.service);
        let handles: Vec<_> = [AppointmentStatus::Cancelled, AppointmentStatus::Completed]
            .into_iter()
            .map(|status| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.change_status(id, status).await })
            })
            .collect();

        let mut applied = Vec::new();
        for handle in handles {
            if let Ok(saved) = handle.await.unwrap() {
                applied.push(saved.status);
            }
        }
        assert_eq!(applied.len(), 1);

        let stored = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, applied[0]);
    }

    #[tokio::test]
    async fn test_list_for_missing_professional() {
        let f = fixture().await;
        assert!(matches!(
            f.service.list_for_professional(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
