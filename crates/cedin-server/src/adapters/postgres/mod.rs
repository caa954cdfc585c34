//! PostgreSQL Repository Implementations

mod appointment_repository;
mod patient_repository;
mod professional_repository;
mod user_repository;

pub use appointment_repository::PgAppointmentRepository;
pub use patient_repository::PgPatientRepository;
pub use professional_repository::PgProfessionalRepository;
pub use user_repository::PgUserRepository;

use cedin::DomainError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const EXCLUSION_VIOLATION: &str = "23P01";

fn sqlstate(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Map a sqlx error to a domain error, surfacing constraint violations
/// as recoverable errors instead of opaque repository failures
pub(crate) fn db_error(e: sqlx::Error) -> DomainError {
    let message = match &e {
        sqlx::Error::Database(db) => db.message().to_string(),
        _ => e.to_string(),
    };

    match sqlstate(&e).as_deref() {
        Some(UNIQUE_VIOLATION) => DomainError::Conflict(message),
        Some(EXCLUSION_VIOLATION) => {
            DomainError::conflict("Professional already has an appointment in that time slot")
        }
        Some(FOREIGN_KEY_VIOLATION) => DomainError::Validation(message),
        _ => DomainError::Repository(e.to_string()),
    }
}

/// Deleting a row still referenced by appointments
pub(crate) fn delete_error(entity_type: &str, e: sqlx::Error) -> DomainError {
    if sqlstate(&e).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
        DomainError::conflict(format!(
            "{} has appointments and cannot be deleted",
            entity_type
        ))
    } else {
        db_error(e)
    }
}

fn corrupt(field: &str, err: String) -> DomainError {
    DomainError::Repository(format!("Invalid {} in database: {}", field, err))
}
