//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use crate::error::Result;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/soil", post(handlers::analyze_soil_sample))
        .route("/weather", get(handlers::weather_forecast))
        .route("/disease", post(handlers::detect_disease));

    // Frontend assets, with index.html for client-side routes
    let frontend = ServeDir::new(&server.static_dir)
        .fallback(ServeFile::new(server.static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C.
pub async fn run_server(state: AppState, server: &ServerConfig) -> Result<()> {
    let app = create_router(state, server);
    let addr = server.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Farmer Assistant running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
