use crate::extractors::settings::Settings;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// GET a welcome message with the running version
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message, version and run status"),
    )
)]
pub async fn index(Settings(config): Settings) -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to Project API",
        "version": config.app_version,
        "status": "running",
    }))
}
