//! Liga application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Connect to PostgreSQL and apply migrations
//! 3. Initialize the upload directory
//! 4. Build router with API routes + static serving of uploads
//! 5. Apply CORS and request logging
//! 6. Start Axum server

use liga::{auth::middleware::AppState, config::Config, middleware::request_log, routes, storage};
use sqlx::postgres::PgPoolOptions;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting liga on {}", config.bind_addr);

    // Connect to PostgreSQL
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database ready");

    // Initialize upload directory
    storage::upload::init_storage(Path::new(&config.upload_dir))
        .await
        .expect("Failed to initialize upload directory");

    // Build shared state
    let state = AppState {
        db: pool,
        config: Arc::new(config.clone()),
    };

    // Build router:
    // - API routes (with state)
    // - Uploaded images served as static assets
    // - CORS open for browser clients, request logging on everything
    let app = routes::api_router()
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .layer(axum::extract::DefaultBodyLimit::max(
            config.max_upload_bytes,
        ))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(request_log))
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
