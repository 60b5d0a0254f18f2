/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Route Map
///
/// ```text
/// /
/// ├── /api/health                         # Health check (public)
/// ├── /api/auth/
/// │   ├── POST /register                  # Email/password signup (public)
/// │   ├── POST /login                     # Login (public)
/// │   └── GET  /me                        # Current user (JWT)
/// ├── /api/users/                         # User management (JWT)
/// ├── /api/tasks/                         # Task CRUD (JWT)
/// ├── /api/pomodoro/                      # Pomodoro sessions (JWT)
/// └── /auth/google[, /callback]           # Google OAuth (public)
/// ```
///
/// # Middleware Stack
///
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. JWT authentication (per-route-group)

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use questify_shared::auth::{
    jwt,
    middleware::{bearer_token, CurrentUser},
};
use questify_shared::models::user::User;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; `Arc`
/// internally so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public endpoints
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/me",
            get(routes::auth::me).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                jwt_auth_layer,
            )),
        );

    // User management (JWT; role checks happen in the handlers)
    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/:id", get(routes::users::get_user))
        .route("/:id", put(routes::users::update_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Owner-scoped task CRUD (JWT)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", axum::routing::delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Pomodoro session endpoints (JWT)
    let pomodoro_routes = Router::new()
        .route("/", get(routes::pomodoro::list_sessions))
        .route("/start", post(routes::pomodoro::start_session))
        .route("/complete", post(routes::pomodoro::complete_session))
        .route("/pause", post(routes::pomodoro::pause_session))
        .route("/reset", post(routes::pomodoro::reset_session))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Google OAuth redirect flow (public; issues a JWT on success)
    let oauth_routes = Router::new()
        .route("/google", get(routes::oauth::google_redirect))
        .route("/google/callback", get(routes::oauth::google_callback));

    let api_routes = Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/pomodoro", pomodoro_routes);

    let cors = build_cors_layer(&state.config.api.cors_origins);

    Router::new()
        .nest("/api", api_routes)
        .nest("/auth", oauth_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(false))
        .with_state(state)
}

/// Configures CORS from the origin allow-list
///
/// A list containing "*" yields a permissive layer (development mode).
fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}

/// JWT authentication middleware layer
///
/// Validates the Bearer token, loads the user it names (a valid token for a
/// deleted account is rejected), and injects [`CurrentUser`] into request
/// extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to load user: {}", e)))?
        .ok_or_else(|| ApiError::Unauthorized("User not found - invalid token".to_string()))?;

    req.extensions_mut().insert(CurrentUser::from_user(&user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_permissive_on_wildcard() {
        // Wildcard must not panic and must build a layer
        let _ = build_cors_layer(&["*".to_string()]);
        let _ = build_cors_layer(&["http://localhost:5173".to_string()]);
    }
}
