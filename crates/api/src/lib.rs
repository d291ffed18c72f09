//! # FitClub API
//!
//! The API crate provides the web server implementation for the FitClub
//! gym-chain backend. It defines RESTful endpoints for the branch, service,
//! trainer and member catalogs, appointment booking with conflict
//! detection, notifications, messaging, support tickets, and the
//! AI-assisted recommendation feature.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database
//! interactions; the recommendation pipeline lives in `fitclub-ai`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use fitclub_ai::client::HttpVisionClient;
use fitclub_ai::pipeline::RecommendationPipeline;
use fitclub_ai::store::PgRecommendationStore;
use fitclub_core::scheduling::BookingPolicy;

/// The concrete pipeline the server runs with.
pub type AppPipeline = RecommendationPipeline<HttpVisionClient, PgRecommendationStore>;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Recommendation pipeline (caches, external model, fallback)
    pub pipeline: AppPipeline,

    /// Site-level booking rules
    pub booking_policy: BookingPolicy,
}

/// Starts the API server with the provided configuration, database
/// connection, and recommendation pipeline.
pub async fn start_server(
    config: config::ApiConfig,
    db_pool: PgPool,
    pipeline: AppPipeline,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        pipeline,
        booking_policy: config.booking_policy,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Catalog endpoints
        .merge(routes::branch::routes())
        .merge(routes::service::routes())
        .merge(routes::trainer::routes())
        // Member registration and lookup
        .merge(routes::member::routes())
        // Appointment booking and lifecycle
        .merge(routes::appointment::routes())
        // Notifications, messaging, support tickets
        .merge(routes::notification::routes())
        .merge(routes::message::routes())
        .merge(routes::ticket::routes())
        // AI recommendations
        .merge(routes::recommendation::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let parsed = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect::<Vec<_>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(parsed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
