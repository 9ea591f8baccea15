use config::{Config, PostgresProvider};
use log::{error, info, warn};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::time::Duration;

pub mod config;
pub mod logging;

/// Builds the connection pool for the configured PostgreSQL provider.
pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    info!("...Initializing Database...");

    let db = match config.postgres_provider {
        PostgresProvider::Local => connect_local(config).await,
        PostgresProvider::Databricks => Err(DbErr::Custom(
            "Databricks engine is not configured. Please implement the databricks connector."
                .to_string(),
        )),
    };

    match db {
        Ok(db) => {
            info!("(DB Provider: {})", config.postgres_provider);
            Ok(db)
        }
        Err(e) => {
            error!("Failed to initialize database connection: {e}");
            Err(e)
        }
    }
}

async fn connect_local(config: &Config) -> Result<DatabaseConnection, DbErr> {
    info!(
        "Database pool config: max_connections={}, min_connections={}, \
         connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
        config.db_max_connections,
        config.db_min_connections,
        config.db_connect_timeout_secs,
        config.db_acquire_timeout_secs,
        config.db_idle_timeout_secs,
        config.db_max_lifetime_secs,
    );

    let mut opt = ConnectOptions::new::<&str>(config.database_url());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs))
        .sqlx_logging(config.database_echo)
        .sqlx_logging_level(log::LevelFilter::Info);

    Database::connect(opt).await
}

/// Closes every pooled connection. Handles still shared elsewhere are left to drop.
pub async fn dispose_database(db: Arc<DatabaseConnection>) {
    match Arc::try_unwrap(db) {
        Ok(db) => {
            info!("...Closing Database...");
            match db.close().await {
                Ok(()) => info!("Database connections closed successfully"),
                Err(e) => error!("Error while disposing database connection: {e}"),
            }
        }
        Err(_) => warn!("Database connection still in use, skipping explicit close"),
    }
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, db: &Arc<DatabaseConnection>) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config: app_config,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}
