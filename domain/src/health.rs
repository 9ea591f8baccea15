//! Readiness of the services the API depends on.

use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

impl DatabaseStatus {
    pub fn is_connected(self) -> bool {
        self == DatabaseStatus::Connected
    }
}

/// Pings the database through the pool.
pub async fn database_status(db: &DatabaseConnection) -> DatabaseStatus {
    match db.ping().await {
        Ok(()) => DatabaseStatus::Connected,
        Err(err) => {
            error!("Database health check failed: {err}");
            DatabaseStatus::Disconnected
        }
    }
}
