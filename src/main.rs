//!
//! Chargebook worker: runs migrations and the notification scheduler.
//! Reads configuration from TOML file (~/.config/chargebook/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use chargebook::application::notifications::start_notification_scheduler;
use chargebook::config::AppConfig;
use chargebook::infrastructure::database::migrator::Migrator;
use chargebook::shared::shutdown::ShutdownCoordinator;
use chargebook::{default_config_path, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CHARGEBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Chargebook booking service...");

    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn chargebook::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Initialize shutdown coordinator and signal listener
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // Start the reminder/cleanup scheduler
    start_notification_scheduler(
        repos,
        shutdown_signal.clone(),
        app_cfg.scheduler.to_scheduler_config(),
    );

    info!("🚀 Chargebook worker started. Press Ctrl+C to shutdown gracefully.");

    // ── Run until shutdown, then clean up ──────────────────────
    shutdown
        .shutdown_with_cleanup(|| async {
            info!("🧹 Performing final cleanup...");

            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        })
        .await;

    info!("👋 Chargebook shutdown complete");
    Ok(())
}
