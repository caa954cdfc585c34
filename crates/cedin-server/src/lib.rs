//! Cedin Manager API Server
//!
//! HTTP API, application services and infrastructure adapters for the
//! `cedin` domain library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod logging;
pub mod models;
pub mod password;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use adapters::Repositories;
use application::{AppointmentService, PatientService, ProfessionalService, UserService};
use password::PasswordService;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub professional_service: Arc<ProfessionalService>,
    pub patient_service: Arc<PatientService>,
    pub appointment_service: Arc<AppointmentService>,
}

impl AppState {
    pub fn new(repos: Repositories, passwords: PasswordService) -> Self {
        Self {
            user_service: Arc::new(UserService::new(
                repos.users.clone(),
                repos.professionals.clone(),
                passwords,
            )),
            professional_service: Arc::new(ProfessionalService::new(
                repos.professionals.clone(),
                repos.users,
            )),
            patient_service: Arc::new(PatientService::new(repos.patients.clone())),
            appointment_service: Arc::new(AppointmentService::new(
                repos.appointments,
                repos.patients,
                repos.professionals,
            )),
        }
    }
}

/// Build the full router with shared state
pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::health::router())
        .merge(routes::users::router())
        .merge(routes::professionals::router())
        .merge(routes::patients::router())
        .merge(routes::appointments::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
