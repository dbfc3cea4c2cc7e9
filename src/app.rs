// Application context and HTTP router

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::auth::{Argon2Hasher, TokenError, TokenIssuer};
use crate::config::{AppConfig, ConfigError};
use crate::database::{Database, HealthCheck, PgTodoRepository, PgUserRepository};
use crate::handlers::{auth, health, todos};
use crate::middleware::cors_layer;
use crate::services::{TodoService, UserService};

/// Process-wide dependencies, built once at startup and cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub users: UserService,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire the Postgres repositories, Argon2 hasher and token issuer around one pool
    pub fn new(db: &Database, config: &AppConfig) -> Result<Self, TokenError> {
        let pool = db.pool().clone();
        let tokens = TokenIssuer::from_config(&config.security)?;

        Ok(Self {
            todos: TodoService::new(Arc::new(PgTodoRepository::new(pool.clone()))),
            users: UserService::new(
                Arc::new(PgUserRepository::new(pool)),
                Arc::new(Argon2Hasher::new()),
                tokens,
            ),
            health: Arc::new(db.clone()),
        })
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Result<Router, ConfigError> {
    Ok(Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes())
        .with_state(state)
        // Global middleware
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes))
        .layer(RequestBodyTimeoutLayer::new(config.server.read_timeout()))
        .layer(TimeoutLayer::new(config.server.write_timeout()))
        .layer(cors_layer(&config.security)?)
        .layer(TraceLayer::new_for_http()))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(health::api_test))
        // Todos
        .route("/todos", get(todos::all_todos).post(todos::create_todo))
        .route("/todos/:id", delete(todos::delete_todo))
        // Accounts
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
}
