//! Router-level integration tests
//!
//! These tests exercise the middleware and routing layers with a lazy pool
//! that never connects, so they cover every path that is rejected before a
//! query runs: missing, malformed, invalid, and expired tokens, plus the
//! response envelope shape and security headers.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use questify_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, GoogleConfig, JwtConfig},
};
use questify_shared::auth::jwt::{create_token, Claims};
use questify_shared::models::user::UserRole;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret-key-0123456789abcdef";

fn test_app() -> Router {
    test_router(None)
}

/// App with Google credentials, for exercising the OAuth routes up to the
/// outbound exchange
fn test_app_with_google() -> Router {
    test_router(Some(GoogleConfig {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        callback_url: "http://localhost:3000/auth/google/callback".to_string(),
    }))
}

fn test_router(google: Option<GoogleConfig>) -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            client_url: "http://localhost:5173".to_string(),
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/questify_test".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        google,
    };

    // Lazy pool: no connection is made until a query runs, and none of
    // these tests get that far
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    build_router(AppState::new(pool, config))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn protected_route_without_token_returns_401() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], serde_json::json!(false));
    assert_eq!(json["error"], serde_json::json!("unauthorized"));
}

#[tokio::test]
async fn malformed_authorization_header_returns_400() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/pomodoro")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], serde_json::json!("bad_request"));
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_returns_401() {
    let claims = Claims::with_expiration(
        uuid::Uuid::new_v4(),
        UserRole::User,
        chrono::Duration::hours(-1),
    );
    let token = create_token(&claims, TEST_SECRET).unwrap();

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], serde_json::json!("Token expired"));
}

#[tokio::test]
async fn token_signed_with_wrong_secret_returns_401() {
    let claims = Claims::new(uuid::Uuid::new_v4(), UserRole::User);
    let token = create_token(&claims, "a-different-secret-key-0123456789abcdef").unwrap();

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/users/00000000-0000-0000-0000-000000000000")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/leaderboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn security_headers_are_present() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Applied even to error responses
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");
}

#[tokio::test]
async fn oauth_redirect_carries_signed_state() {
    let response = test_app_with_google()
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(location.contains("state="));
    assert!(location.contains("client_id=test-client-id"));
}

#[tokio::test]
async fn oauth_callback_denied_redirects_to_client() {
    let response = test_app_with_google()
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Failures go back to the frontend as a redirect, never a JSON body
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        location,
        "http://localhost:5173/auth/callback?error=access_denied"
    );
}

#[tokio::test]
async fn oauth_callback_rejects_forged_state() {
    let response = test_app_with_google()
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?code=abc&state=not-ours")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        location,
        "http://localhost:5173/auth/callback?error=access_denied"
    );
}

#[tokio::test]
async fn oauth_callback_without_state_redirects_invalid_request() {
    let response = test_app_with_google()
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?code=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        location,
        "http://localhost:5173/auth/callback?error=invalid_request"
    );
}

#[tokio::test]
async fn oauth_routes_disabled_without_credentials() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], serde_json::json!("service_unavailable"));
}
