//! Appointment Routes - Booking and lifecycle
//!
//! HTTP handlers that delegate to AppointmentService for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::models::{
    AppointmentQuery, AppointmentResponse, CreateAppointmentRequest, UpdateAppointmentRequest,
    UpdateAppointmentStatusRequest,
};
use crate::AppState;

use super::{error_response, not_found};

/// List Appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Appointments ordered by start time",
            body = Vec<AppointmentResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Appointment"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, (StatusCode, String)> {
    let appointments = state
        .appointment_service
        .list(query.into())
        .await
        .map_err(error_response)?;

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

/// Book new Appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Invalid appointment data or inactive professional"),
        (status = 404, description = "Patient or Professional not found"),
        (status = 409, description = "Slot overlaps another appointment")
    ),
    tag = "Appointment"
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), (StatusCode, String)> {
    let appointment = state
        .appointment_service
        .book(payload.into())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(appointment.into())))
}

/// Get Appointment by ID
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentResponse),
        (status = 404, description = "Appointment not found")
    ),
    tag = "Appointment"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, (StatusCode, String)> {
    let appointment = state
        .appointment_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Appointment"))?;

    Ok(Json(appointment.into()))
}

/// Reschedule or edit Appointment
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentResponse),
        (status = 400, description = "Invalid data or closed appointment"),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Slot overlaps another appointment")
    ),
    tag = "Appointment"
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, (StatusCode, String)> {
    let appointment = state
        .appointment_service
        .reschedule(id, payload.into())
        .await
        .map_err(error_response)?;

    Ok(Json(appointment.into()))
}

/// Change Appointment status
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = AppointmentResponse),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Appointment"
)]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<AppointmentResponse>, (StatusCode, String)> {
    let appointment = state
        .appointment_service
        .change_status(id, payload.status)
        .await
        .map_err(error_response)?;

    Ok(Json(appointment.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(book_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(get_appointment).put(update_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            put(update_appointment_status),
        )
}
