pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./car_rental.db?mode=rwc")
    pub url: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./car_rental.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections.max(1))
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}
