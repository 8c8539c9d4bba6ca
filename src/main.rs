//! Athenaeum Server - Digital Library Management System

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use athenaeum_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("athenaeum_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Athenaeum Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.circulation.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Identity bridge
        .route("/auth/user", post(api::auth::sync_user))
        // Books (catalog)
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        // Categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        // Borrows
        .route("/borrows", get(api::borrows::list_borrows))
        .route("/borrows", post(api::borrows::create_borrow))
        .route("/borrows/:id/return", post(api::borrows::return_borrow))
        // Fines
        .route("/fines", get(api::fines::list_fines))
        .route("/fines", post(api::fines::create_fine))
        .route("/fines", patch(api::fines::update_fine))
        // Library cards
        .route("/library-card", get(api::library_cards::get_card))
        .route("/library-card", post(api::library_cards::issue_card))
        .route("/library-card", patch(api::library_cards::update_card))
        // Reviews
        .route("/reviews", get(api::reviews::list_reviews))
        .route("/reviews", post(api::reviews::create_review))
        // Wishlist
        .route("/wishlist", get(api::wishlist::list_wishlist))
        .route("/wishlist", post(api::wishlist::add_to_wishlist))
        .route("/wishlist", delete(api::wishlist::remove_from_wishlist))
        // Reading progress
        .route("/reading-progress", get(api::reading_progress::get_reading_progress))
        .route("/reading-progress", post(api::reading_progress::upsert_reading_progress))
        // Notifications
        .route("/notifications", get(api::notifications::list_notifications))
        .route("/notifications", post(api::notifications::create_notification))
        .route("/notifications", patch(api::notifications::mark_notification))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
