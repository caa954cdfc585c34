//! Professional Routes - Practitioner management
//!
//! HTTP handlers that delegate to ProfessionalService and
//! AppointmentService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::application::ProfessionalChanges;
use crate::models::{
    AppointmentResponse, CreateProfessionalRequest, LinkUserRequest, ProfessionalResponse,
    UpdateProfessionalRequest,
};
use crate::AppState;

use super::{error_response, not_found};

/// List all Professionals
#[utoipa::path(
    get,
    path = "/api/professionals",
    responses(
        (status = 200, description = "List of all Professionals", body = Vec<ProfessionalResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Professional"
)]
pub async fn list_professionals(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfessionalResponse>>, (StatusCode, String)> {
    let professionals = state
        .professional_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(professionals.into_iter().map(Into::into).collect()))
}

/// Create new Professional
#[utoipa::path(
    post,
    path = "/api/professionals",
    request_body = CreateProfessionalRequest,
    responses(
        (status = 201, description = "Professional created", body = ProfessionalResponse),
        (status = 400, description = "Invalid professional data"),
        (status = 404, description = "User to link not found"),
        (status = 409, description = "User already linked to another professional")
    ),
    tag = "Professional"
)]
pub async fn create_professional(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfessionalRequest>,
) -> Result<(StatusCode, Json<ProfessionalResponse>), (StatusCode, String)> {
    let profile = ProfessionalChanges {
        specialty: payload.specialty,
        registration_number: payload.registration_number,
        email: payload.email,
        phone: payload.phone,
        color: payload.color,
        status: payload.status,
        ..Default::default()
    };
    let professional = state
        .professional_service
        .create(payload.first_name, payload.last_name, profile, payload.user_id)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(professional.into())))
}

/// Get Professional by ID
#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Professional found", body = ProfessionalResponse),
        (status = 404, description = "Professional not found")
    ),
    tag = "Professional"
)]
pub async fn get_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessionalResponse>, (StatusCode, String)> {
    let professional = state
        .professional_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Professional"))?;

    Ok(Json(professional.into()))
}

/// Update Professional
///
/// Setting `status` to `inactive` retires the professional from new bookings.
#[utoipa::path(
    put,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = UpdateProfessionalRequest,
    responses(
        (status = 200, description = "Professional updated", body = ProfessionalResponse),
        (status = 400, description = "Invalid professional data"),
        (status = 404, description = "Professional not found")
    ),
    tag = "Professional"
)]
pub async fn update_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfessionalRequest>,
) -> Result<Json<ProfessionalResponse>, (StatusCode, String)> {
    let professional = state
        .professional_service
        .update(id, payload.into())
        .await
        .map_err(error_response)?;

    Ok(Json(professional.into()))
}

/// Delete Professional
#[utoipa::path(
    delete,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Professional deleted"),
        (status = 404, description = "Professional not found"),
        (status = 409, description = "Professional has appointments")
    ),
    tag = "Professional"
)]
pub async fn delete_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .professional_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("Professional"));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Professional deleted"
    })))
}

// ============================================
// Professional-User Link Routes
// ============================================

/// Link a User account to a Professional
#[utoipa::path(
    put,
    path = "/api/professionals/{id}/user",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = LinkUserRequest,
    responses(
        (status = 200, description = "User linked", body = ProfessionalResponse),
        (status = 404, description = "Professional or User not found"),
        (status = 409, description = "User already linked to another professional")
    ),
    tag = "Professional"
)]
pub async fn link_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkUserRequest>,
) -> Result<Json<ProfessionalResponse>, (StatusCode, String)> {
    let professional = state
        .professional_service
        .link_user(id, payload.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(professional.into()))
}

/// Unlink the User account of a Professional
#[utoipa::path(
    delete,
    path = "/api/professionals/{id}/user",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "User unlinked", body = ProfessionalResponse),
        (status = 404, description = "Professional not found")
    ),
    tag = "Professional"
)]
pub async fn unlink_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessionalResponse>, (StatusCode, String)> {
    let professional = state
        .professional_service
        .unlink_user(id)
        .await
        .map_err(error_response)?;

    Ok(Json(professional.into()))
}

/// List a Professional's appointments
#[utoipa::path(
    get,
    path = "/api/professionals/{id}/appointments",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Appointments ordered by start time",
            body = Vec<AppointmentResponse>),
        (status = 404, description = "Professional not found")
    ),
    tag = "Professional"
)]
pub async fn list_professional_appointments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentResponse>>, (StatusCode, String)> {
    let appointments = state
        .appointment_service
        .list_for_professional(id)
        .await
        .map_err(error_response)?;

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/professionals",
            get(list_professionals).post(create_professional),
        )
        .route(
            "/api/professionals/:id",
            get(get_professional)
                .put(update_professional)
                .delete(delete_professional),
        )
        .route(
            "/api/professionals/:id/user",
            put(link_user).delete(unlink_user),
        )
        .route(
            "/api/professionals/:id/appointments",
            get(list_professional_appointments),
        )
}
