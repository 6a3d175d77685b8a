//!
//! Fuel station dashboard service.
//! Reads configuration from TOML file (~/.config/fuelstation/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use fuelstation::domain::StationRepository;
use fuelstation::{
    create_router, default_config_path, AppConfig, AppState, DatabaseConfig,
    SeaOrmStationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STATION_CONFIG")
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

    info!("Starting fuel station dashboard service...");

    // ── Database facade ────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| app_cfg.database.connection_url()),
    };
    info!("Database: {}", db_config.url);

    let repo: Arc<dyn StationRepository> = Arc::new(SeaOrmStationRepository::new(db_config));

    // Connectivity probe. The service still starts when the database is
    // down: views render empty with a warning until it comes back.
    if let Err(e) = repo.ping().await {
        warn!("Database unreachable at startup: {}", e);
    } else {
        info!("Database reachable");
    }

    // ── HTTP server ────────────────────────────────────────────
    let state = AppState::new(repo);
    let app = create_router(state);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard API listening on {}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
