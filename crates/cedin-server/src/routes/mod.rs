//! Cedin API Routes
//!
//! - /api/health - Liveness check
//! - /api/users - Staff accounts
//! - /api/professionals - Practitioners and their User link
//! - /api/patients - Patients
//! - /api/appointments - Booking, rescheduling and status changes

pub mod appointments;
pub mod health;
pub mod patients;
pub mod professionals;
pub mod swagger;
pub mod users;

use axum::http::StatusCode;

use cedin::DomainError;

/// Map a domain error to the HTTP status and message returned to clients
pub(crate) fn error_response(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) | DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::Repository(_) => {
            tracing::error!("Repository failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

pub(crate) fn not_found(entity_type: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} not found", entity_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedin::AppointmentStatus;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_response(DomainError::not_found("Patient", uuid::Uuid::nil())).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(DomainError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(DomainError::conflict("taken")).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(DomainError::InvalidTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Cancelled,
            })
            .0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(DomainError::Repository("down".to_string())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
