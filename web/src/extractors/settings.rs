use crate::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use service::config::Config;
use std::convert::Infallible;

/// Read-only view of the application settings loaded at startup.
pub(crate) struct Settings(pub Config);

impl FromRequestParts<AppState> for Settings {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.config.clone()))
    }
}
