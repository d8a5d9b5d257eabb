//! NutriScan Server
//!
//! A food-label scanner: photograph a label, OCR it, and get an
//! ingredient health report with alternative suggestions.

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nutriscan_server::config::Config;
use nutriscan_server::db;
use nutriscan_server::routes;
use nutriscan_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutriscan_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting NutriScan Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upload directory: {}", config.uploads.dir.display());
    tracing::info!(
        "Recommendation dataset: {}",
        config.recommend.dataset_path.display()
    );

    // Initialize database
    let db_pool = db::create_pool(&config.database.url)
        .await
        .expect("Failed to initialize database");
    tracing::info!("Database initialized at {}", config.database.url);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server address");

    // Create application state and make sure the upload directory exists
    let app_state = AppState::new(config, db_pool);
    app_state
        .images()
        .init()
        .await
        .expect("Failed to create upload directory");

    let available = app_state.ocr().available_providers().await;
    if available.is_empty() {
        tracing::warn!("No OCR providers available; scans will proceed without text");
    } else {
        tracing::info!("OCR providers available: {:?}", available);
    }

    // Build router
    let app = routes::router(app_state);

    // Start server with graceful shutdown
    tracing::info!("NutriScan Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
