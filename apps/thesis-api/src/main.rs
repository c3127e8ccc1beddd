//! Thesis Format API Server
//!
//! Provides REST endpoints for:
//! - Document upload and validation
//! - Automatic correction and chapter restructuring
//! - Compliance report download

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("thesis_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Initialize application state
    info!("Initializing Thesis Format API...");
    let state = AppState::new()?;
    let state = Arc::new(state);

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Upload and validation
        .route("/api/upload", post(handlers::upload))
        .route("/api/validate/:file_id", get(handlers::validate))
        // Remediation
        .route("/api/correct/:file_id", post(handlers::correct))
        .route("/api/restructure/:file_id", post(handlers::restructure))
        .route(
            "/api/preview-restructure/:file_id",
            get(handlers::preview_restructure),
        )
        // Artifacts
        .route("/api/report/:file_id", get(handlers::report))
        .route("/api/download/:file_id", get(handlers::download))
        .route("/api/status/:file_id", get(handlers::status))
        // Rule set
        .route("/api/rules", get(handlers::rules))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Parse bind address
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Thesis Format API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
