mod auth;
mod config;
mod db;
mod reviews;

use std::sync::Arc;

use axum::{
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    repository::UserRepository, service::AuthService, token::TokenService, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse, Role, UpdateReport, UpdateUserRequest,
    UpdateUserResponse, UserResponse,
};
use config::Config;
use reviews::{
    repository::ReviewRepository, service::ReviewService, DeleteReport, ReviewUpdateResponse,
    UpdateOutcome,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::update_user_handler,
        reviews::handlers::create_review_handler,
        reviews::handlers::get_review_handler,
        reviews::handlers::update_review_handler,
        reviews::handlers::delete_review_handler,
        reviews::handlers::list_reviews_handler,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateUserRequest,
            UserResponse,
            Role,
            RegisterResponse,
            LoginResponse,
            UpdateUserResponse,
            UpdateReport,
            ReviewUpdateResponse,
            UpdateOutcome,
            DeleteReport,
            ServerStatus,
        )
    ),
    tags(
        (name = "auth", description = "User registration and login"),
        (name = "reviews", description = "Review document collection"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "Review Hub API",
        version = "1.0.0",
        description = "RESTful API for user accounts and review documents"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub review_service: ReviewService,
}

/// Liveness probe payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerStatus {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler for GET /
/// Reports that the server is up
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = ServerStatus)
    ),
    tag = "health"
)]
async fn health_check() -> Json<ServerStatus> {
    Json(ServerStatus {
        message: "Server is running smoothly".to_string(),
        timestamp: Utc::now(),
    })
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(auth_service: Arc<AuthService>, review_service: ReviewService) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState {
        auth_service,
        review_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Liveness probe
        .route("/", get(health_check))
        // Auth routes (versioned prefix)
        .route("/api/v1/register", post(auth::handlers::register_handler))
        .route("/api/v1/login", post(auth::handlers::login_handler))
        .route("/user/:email", patch(auth::handlers::update_user_handler))
        // Review document routes (unprefixed, matching the existing clients)
        .route("/review", post(reviews::handlers::create_review_handler))
        .route("/reviews", get(reviews::handlers::list_reviews_handler))
        .route("/reviews/:id", get(reviews::handlers::get_review_handler))
        .route(
            "/review/update/:id",
            patch(reviews::handlers::update_review_handler),
        )
        .route(
            "/review/:id",
            delete(reviews::handlers::delete_review_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Review Hub API - Starting...");

    // All configuration is required; refuse to start without it
    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Wire up services around the shared pool
    let token_service = TokenService::new(config.jwt_secret.clone(), config.jwt_ttl_secs);
    let auth_service = Arc::new(AuthService::new(
        UserRepository::new(db_pool.clone()),
        token_service,
    ));
    let review_service = ReviewService::new(ReviewRepository::new(db_pool.clone()));

    let app = create_router(auth_service, review_service);

    // Start the Axum server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Review Hub API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
