//! Service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the service lifecycle:
//! database init, migrations, service wiring, default-user seeding and
//! shutdown.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::application::{seed_default_users, SeedReport, Services};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, BcryptPasswordEncoder, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured default users if missing (default: true).
    pub seed_users: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_users: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a started service.
///
/// ```rust,no_run
/// use carrental::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     let cars = handle.services.cars.clone();
///     // ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Entity services wired over the repositories.
    pub services: Services,
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the service was started with.
    pub config: AppConfig,
    /// What startup seeding did, `None` when it was skipped.
    pub seed_report: Option<SeedReport>,

    db: DatabaseConnection,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations
    /// 2. Wire repositories and services
    /// 3. Seed default users (if enabled)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting car rental service...");

        // ── Database ───────────────────────────────────────────
        let db_config = app_cfg.database_config();
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let encoder = Arc::new(BcryptPasswordEncoder::new(app_cfg.security.bcrypt_cost));
        let services = Services::new(repos.clone(), encoder);

        // ── Seeding ────────────────────────────────────────────
        let seed_report = if opts.seed_users && app_cfg.seed.enabled {
            Some(seed_default_users(&services.users, &app_cfg.seed).await?)
        } else {
            info!("Default user seeding skipped");
            None
        };

        info!("Car rental service ready");

        Ok(Self {
            services,
            repos,
            config: app_cfg,
            seed_report,
            db,
        })
    }

    /// Close the database connection.
    pub async fn shutdown(self) {
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;

    fn in_memory_options(seed_users: bool) -> ServerOptions {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.security.bcrypt_cost = 4;
        ServerOptions {
            config,
            auto_migrate: true,
            seed_users,
        }
    }

    #[tokio::test]
    async fn start_migrates_and_seeds() {
        let handle = ServerHandle::start(in_memory_options(true)).await.unwrap();

        let report = handle.seed_report.clone().unwrap();
        assert_eq!(report.created.len(), 2);
        assert_eq!(handle.services.users.find_all().await.unwrap().len(), 2);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn start_without_seeding() {
        let handle = ServerHandle::start(in_memory_options(false)).await.unwrap();

        assert!(handle.seed_report.is_none());
        assert!(handle.services.users.find_all().await.unwrap().is_empty());
        assert_eq!(handle.services.roles.find_all().await.unwrap().len(), 2);

        handle.shutdown().await;
    }
}
