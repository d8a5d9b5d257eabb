//! Route modules for the NutriScan server

pub mod auth;
pub mod health;
pub mod reports;
pub mod scan;
pub mod uploads;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/auth", auth::router())
        .nest("/scan", scan::router())
        .merge(reports::router());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .nest("/uploads", uploads::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
