//! Patient Routes
//!
//! HTTP handlers that delegate to PatientService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{
    AppointmentResponse, CreatePatientRequest, PatientResponse, UpdatePatientRequest,
};
use crate::AppState;

use super::{error_response, not_found};

/// List all Patients
#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of all Patients", body = Vec<PatientResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Patient"
)]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, (StatusCode, String)> {
    let patients = state
        .patient_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

/// Register new Patient
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Invalid patient data"),
        (status = 409, description = "DNI already registered")
    ),
    tag = "Patient"
)]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientResponse>), (StatusCode, String)> {
    let patient = state
        .patient_service
        .create(
            payload.first_name,
            payload.last_name,
            payload.dni,
            payload.email,
            payload.phone,
            payload.birth_date,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(patient.into())))
}

/// Get Patient by ID
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient found", body = PatientResponse),
        (status = 404, description = "Patient not found")
    ),
    tag = "Patient"
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PatientResponse>, (StatusCode, String)> {
    let patient = state
        .patient_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Patient"))?;

    Ok(Json(patient.into()))
}

/// Update Patient
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientResponse),
        (status = 404, description = "Patient not found"),
        (status = 409, description = "DNI already registered")
    ),
    tag = "Patient"
)]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePatientRequest>,
) -> Result<Json<PatientResponse>, (StatusCode, String)> {
    let patient = state
        .patient_service
        .update(id, payload.into())
        .await
        .map_err(error_response)?;

    Ok(Json(patient.into()))
}

/// Delete Patient
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient deleted"),
        (status = 404, description = "Patient not found"),
        (status = 409, description = "Patient has appointments")
    ),
    tag = "Patient"
)]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .patient_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("Patient"));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Patient deleted"
    })))
}

/// List a Patient's appointments
#[utoipa::path(
    get,
    path = "/api/patients/{id}/appointments",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Appointments ordered by start time",
            body = Vec<AppointmentResponse>),
        (status = 404, description = "Patient not found")
    ),
    tag = "Patient"
)]
pub async fn list_patient_appointments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentResponse>>, (StatusCode, String)> {
    let appointments = state
        .appointment_service
        .list_for_patient(id)
        .await
        .map_err(error_response)?;

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route(
            "/api/patients/:id/appointments",
            get(list_patient_appointments),
        )
}
