use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cedin::domain::services::scheduling;
use cedin::{
    Appointment, AppointmentFilter, AppointmentRepository, AppointmentStatus, DomainError,
    Patient, PatientRepository, Professional, ProfessionalRepository, User, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    professionals: HashMap<Uuid, Professional>,
    patients: HashMap<Uuid, Patient>,
    appointments: HashMap<Uuid, Appointment>,
}

impl Tables {
    fn has_appointments(&self, pred: impl Fn(&Appointment) -> bool) -> bool {
        self.appointments.values().any(pred)
    }

    fn ensure_linkable(&self, professional_id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        if !self.users.contains_key(&user_id) {
            return Err(DomainError::not_found("User", user_id));
        }
        let taken = self
            .professionals
            .values()
            .any(|p| p.id != professional_id && p.user_id == Some(user_id));
        if taken {
            return Err(DomainError::conflict(format!(
                "User {} is already linked to another professional",
                user_id
            )));
        }
        Ok(())
    }
}

/// Thread-safe in-memory store implementing all repository ports
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        Ok(sorted(users, |u| u.username.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        for other in tables.users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(DomainError::conflict(format!(
                    "Username '{}' is already taken",
                    user.username
                )));
            }
            if other.email.eq_ignore_ascii_case(&user.email) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    user.email
                )));
            }
        }

        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        for professional in tables.professionals.values_mut() {
            if professional.user_id == Some(id) {
                professional.user_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ProfessionalRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professional>, DomainError> {
        Ok(self.tables.read().await.professionals.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Professional>, DomainError> {
        let professionals: Vec<Professional> = self
            .tables
            .read()
            .await
            .professionals
            .values()
            .cloned()
            .collect();
        Ok(sorted(professionals, |p| {
            (p.last_name.clone(), p.first_name.clone())
        }))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Professional>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .professionals
            .values()
            .find(|p| p.user_id == Some(user_id))
            .cloned())
    }

    async fn save(&self, professional: &Professional) -> Result<Professional, DomainError> {
        let mut tables = self.tables.write().await;

        let saved = match tables.professionals.get(&professional.id) {
            Some(stored) => Professional {
                user_id: stored.user_id,
                ..professional.clone()
            },
            None => {
                if let Some(user_id) = professional.user_id {
                    tables.ensure_linkable(professional.id, user_id)?;
                }
                professional.clone()
            }
        };

        tables.professionals.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.professionals.contains_key(&id) {
            return Ok(false);
        }
        if tables.has_appointments(|a| a.professional_id == id) {
            return Err(DomainError::conflict(
                "Professional has appointments and cannot be deleted",
            ));
        }
        Ok(tables.professionals.remove(&id).is_some())
    }

    async fn link_user(
        &self,
        professional_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Professional, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.professionals.contains_key(&professional_id) {
            return Err(DomainError::not_found("Professional", professional_id));
        }
        if let Some(user_id) = user_id {
            tables.ensure_linkable(professional_id, user_id)?;
        }

        let professional = tables
            .professionals
            .get_mut(&professional_id)
            .ok_or_else(|| DomainError::not_found("Professional", professional_id))?;
        professional.user_id = user_id;
        Ok(professional.clone())
    }
}

#[async_trait]
impl PatientRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        Ok(self.tables.read().await.patients.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Patient>, DomainError> {
        let patients: Vec<Patient> = self
            .tables
            .read()
            .await
            .patients
            .values()
            .cloned()
            .collect();
        Ok(sorted(patients, |p| {
            (p.last_name.clone(), p.first_name.clone())
        }))
    }

    async fn find_by_dni(&self, dni: &str) -> Result<Option<Patient>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.patients.values().find(|p| p.dni == dni).cloned())
    }

    async fn save(&self, patient: &Patient) -> Result<Patient, DomainError> {
        let mut tables = self.tables.write().await;

        let duplicate = tables
            .patients
            .values()
            .any(|p| p.id != patient.id && p.dni == patient.dni);
        if duplicate {
            return Err(DomainError::conflict(format!(
                "A patient with DNI '{}' already exists",
                patient.dni
            )));
        }

        tables.patients.insert(patient.id, patient.clone());
        Ok(patient.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&id) {
            return Ok(false);
        }
        if tables.has_appointments(|a| a.patient_id == id) {
            return Err(DomainError::conflict(
                "Patient has appointments and cannot be deleted",
            ));
        }
        Ok(tables.patients.remove(&id).is_some())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError> {
        Ok(self.tables.read().await.appointments.get(&id).cloned())
    }

    async fn find_all(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>, DomainError> {
        let tables = self.tables.read().await;
        let matching: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        Ok(sorted(matching, |a| (a.date_time, a.created_at)))
    }

    async fn book(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.professionals.contains_key(&appointment.professional_id) {
            return Err(DomainError::not_found(
                "Professional",
                appointment.professional_id,
            ));
        }
        if !tables.patients.contains_key(&appointment.patient_id) {
            return Err(DomainError::not_found("Patient", appointment.patient_id));
        }
        if tables.appointments.contains_key(&appointment.id) {
            return Err(DomainError::conflict(format!(
                "Appointment {} already exists",
                appointment.id
            )));
        }

        scheduling::ensure_no_conflict(appointment, tables.appointments.values())?;

        tables
            .appointments
            .insert(appointment.id, appointment.clone());
        Ok(appointment.clone())
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .appointments
            .get(&appointment.id)
            .ok_or_else(|| DomainError::not_found("Appointment", appointment.id))?;
        scheduling::ensure_status_unchanged(appointment.id, appointment.status, stored.status)?;

        // Only the slot, type and notes change here
        let updated = Appointment {
            patient_id: stored.patient_id,
            professional_id: stored.professional_id,
            status: stored.status,
            created_at: stored.created_at,
            ..appointment.clone()
        };

        scheduling::ensure_no_conflict(&updated, tables.appointments.values())?;

        tables.appointments.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Appointment, DomainError> {
        scheduling::ensure_transition(from, to)?;

        let mut tables = self.tables.write().await;
        let appointment = tables
            .appointments
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;
        scheduling::ensure_status_unchanged(id, from, appointment.status)?;

        appointment.status = to;
        Ok(appointment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cedin::Role;
    use chrono::{Duration, TimeZone, Utc};

    async fn seed(store: &MemoryStore) -> (Professional, Patient) {
        let professional = Professional::new("Laura".to_string(), "Gómez".to_string());
        let patient = Patient::new(
            "Juan".to_string(),
            "Pérez".to_string(),
            "30111222".to_string(),
        );
        ProfessionalRepository::save(store, &professional).await.unwrap();
        PatientRepository::save(store, &patient).await.unwrap();
        (professional, patient)
    }

    fn at(patient: &Patient, professional: &Professional, hour: u32) -> Appointment {
        Appointment::new(
            patient.id,
            professional.id,
            Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap(),
            Some(60),
            None,
            None,
        )
    }

    fn user(username: &str, email: &str) -> User {
        User::new(
            username.to_string(),
            email.to_string(),
            "hash".to_string(),
            Role::Admin,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let store = MemoryStore::new();
        UserRepository::save(&store, &user("ana", "ana@cedin.com")).await.unwrap();

        let err = UserRepository::save(&store, &user("ana2", "ANA@cedin.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_user_can_be_resaved() {
        let store = MemoryStore::new();
        let mut u = user("ana", "ana@cedin.com");
        UserRepository::save(&store, &u).await.unwrap();
        u.is_active = false;
        let saved = UserRepository::save(&store, &u).await.unwrap();
        assert!(!saved.is_active);
    }

    #[tokio::test]
    async fn test_book_rejects_missing_references() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;

        let mut orphan = at(&patient, &professional, 9);
        orphan.patient_id = Uuid::new_v4();
        let err = store.book(&orphan).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { ref entity_type, .. } if entity_type == "Patient"
        ));

        let mut orphan = at(&patient, &professional, 9);
        orphan.professional_id = Uuid::new_v4();
        let err = store.book(&orphan).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { ref entity_type, .. } if entity_type == "Professional"
        ));
    }

    #[tokio::test]
    async fn test_book_rejects_overlap_until_cancelled() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;

        let first = store.book(&at(&patient, &professional, 9)).await.unwrap();
        let clash = at(&patient, &professional, 9);
        assert!(matches!(
            store.book(&clash).await,
            Err(DomainError::Conflict(_))
        ));

        store
            .update_status(first.id, AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
            .await
            .unwrap();
        assert!(store.book(&clash).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_take_the_slot_once() {
        let store = Arc::new(MemoryStore::new());
        let (professional, patient) = seed(&store).await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let candidate = at(&patient, &professional, 9);
                tokio::spawn(async move { store.book(&candidate).await })
            })
            .collect();

        let mut booked = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => booked += 1,
                Err(e) => assert!(matches!(e, DomainError::Conflict(_))),
            }
        }
        assert_eq!(booked, 1);
    }

    #[tokio::test]
    async fn test_update_status_requires_current_status() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;
        let booked = store.book(&at(&patient, &professional, 9)).await.unwrap();

        store
            .update_status(booked.id, AppointmentStatus::Scheduled, AppointmentStatus::Confirmed)
            .await
            .unwrap();

        // A second change still based on `scheduled` must not apply
        let err = store
            .update_status(booked.id, AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = AppointmentRepository::find_by_id(&store, booked.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_update_does_not_revive_cancelled() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;
        let booked = store.book(&at(&patient, &professional, 9)).await.unwrap();

        store
            .update_status(booked.id, AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
            .await
            .unwrap();

        // Edit prepared from the copy read before the cancellation
        let moved = Appointment {
            date_time: booked.date_time + Duration::hours(2),
            ..booked.clone()
        };
        let err = store.update(&moved).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = AppointmentRepository::find_by_id(&store, booked.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, AppointmentStatus::Cancelled);
        assert_eq!(stored.date_time, booked.date_time);
    }

    #[tokio::test]
    async fn test_update_keeps_status() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;
        let booked = store.book(&at(&patient, &professional, 9)).await.unwrap();

        let edited = store
            .update(&Appointment {
                notes: Some("control".to_string()),
                ..booked.clone()
            })
            .await
            .unwrap();
        assert_eq!(edited.status, AppointmentStatus::Scheduled);
        assert_eq!(edited.notes.as_deref(), Some("control"));
    }

    #[tokio::test]
    async fn test_delete_patient_with_appointments_is_rejected() {
        let store = MemoryStore::new();
        let (professional, patient) = seed(&store).await;
        store.book(&at(&patient, &professional, 9)).await.unwrap();

        assert!(matches!(
            PatientRepository::delete(&store, patient.id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            ProfessionalRepository::delete(&store, professional.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_user_unlinks_professional() {
        let store = MemoryStore::new();
        let (professional, _) = seed(&store).await;
        let u = user("laura", "laura@cedin.com");
        UserRepository::save(&store, &u).await.unwrap();
        store.link_user(professional.id, Some(u.id)).await.unwrap();

        assert!(UserRepository::delete(&store, u.id).await.unwrap());
        let professional = ProfessionalRepository::find_by_id(&store, professional.id)
            .await
            .unwrap()
            .unwrap();
        assert!(professional.user_id.is_none());
    }

    #[tokio::test]
    async fn test_link_is_one_to_one() {
        let store = MemoryStore::new();
        let (first, _) = seed(&store).await;
        let second = Professional::new("Pablo".to_string(), "Ruiz".to_string());
        ProfessionalRepository::save(&store, &second).await.unwrap();
        let u = user("laura", "laura@cedin.com");
        UserRepository::save(&store, &u).await.unwrap();

        store.link_user(first.id, Some(u.id)).await.unwrap();
        assert!(matches!(
            store.link_user(second.id, Some(u.id)).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_save_keeps_existing_link() {
        let store = MemoryStore::new();
        let (professional, _) = seed(&store).await;
        let u = user("laura", "laura@cedin.com");
        UserRepository::save(&store, &u).await.unwrap();
        store.link_user(professional.id, Some(u.id)).await.unwrap();

        // Profile edit built from a copy read before the link
        let saved = ProfessionalRepository::save(
            &store,
            &Professional {
                specialty: Some("Kinesiología".to_string()),
                ..professional.clone()
            },
        )
        .await
        .unwrap();

        assert_eq!(saved.specialty.as_deref(), Some("Kinesiología"));
        assert_eq!(saved.user_id, Some(u.id));
    }
}
