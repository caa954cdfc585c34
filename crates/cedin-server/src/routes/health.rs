//! Health check

use axum::{routing::get, Json, Router};

use crate::models::HealthCheck;
use crate::AppState;

/// Liveness check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API is running", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Cedin Manager API is running".to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}
