use crate::{AppState, Error};
use axum::{extract::FromRequestParts, http::request::Parts};
use log::*;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handle to the connection pool. Each statement run through it checks a
/// connection out of the pool and returns it when done.
pub(crate) struct DbConn(pub Arc<DatabaseConnection>);

impl FromRequestParts<AppState> for DbConn {
    type Rejection = Error;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if matches!(state.db_conn_ref(), DatabaseConnection::Disconnected) {
            error!("Request needs the database, but it was never initialized");
            return Err(Error::ServiceUnavailable(
                "Database not initialized".to_string(),
            ));
        }
        Ok(Self(Arc::clone(&state.database_connection)))
    }
}
