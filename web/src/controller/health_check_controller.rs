use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::health::{self, DatabaseStatus};
use serde_json::json;

/// GET liveness of the API process
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests"),
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "healthy"})))
}

/// GET readiness of the API, including its database
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "The database answers"),
        (status = 503, description = "The database is unreachable"),
    )
)]
pub async fn readiness(State(app_state): State<AppState>) -> impl IntoResponse {
    match health::database_status(app_state.db_conn_ref()).await {
        DatabaseStatus::Connected => (
            StatusCode::OK,
            Json(json!({"status": "healthy", "postgres": DatabaseStatus::Connected})),
        ),
        DatabaseStatus::Disconnected => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "unhealthy", "postgres": DatabaseStatus::Disconnected})),
        ),
    }
}
