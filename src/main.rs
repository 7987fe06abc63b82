mod auth;
mod config;
mod db;
mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    repository::UserRepository,
    service::AuthService,
    token::TokenService,
};
use config::AppConfig;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signup_handler,
        auth::handlers::signin_handler,
        auth::handlers::current_handler,
        auth::handlers::logout_handler,
    ),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, UserResponse)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Email/password authentication endpoints")
    ),
    info(
        title = "Session Auth API",
        version = "1.0.0",
        description = "Email/password authentication with single bound session tokens"
    )
)]
struct ApiDoc;

/// Registers the bearer scheme referenced by the protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

/// Creates and configures the application router
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/signup", post(auth::signup_handler))
        .route("/signin", post(auth::signin_handler))
        .route("/current", get(auth::current_handler))
        .route("/logout", post(auth::logout_handler))
        .layer(cors)
        .with_state(state)
}

/// Build the application state from configuration and a connected pool
fn build_state(config: &AppConfig, pool: db::DbPool) -> AppState {
    let user_repo = UserRepository::new(pool);
    let token_service = TokenService::new(config.jwt_secret.clone(), config.session_ttl_seconds);

    AppState {
        auth: Arc::new(AuthService::new(user_repo, token_service)),
    }
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

    tracing::info!("Session Auth API - Starting...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // A failed database connection at startup is fatal: exit code 1
    tracing::info!("Connecting to database...");
    let db_pool = match db::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(build_state(&config, db_pool));

    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Session Auth API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
