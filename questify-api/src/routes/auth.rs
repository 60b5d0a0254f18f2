/// Registration, login, and current-user endpoints
///
/// Registration and login both return a freshly signed JWT alongside the
/// user record. Login failures are deliberately indistinguishable: a wrong
/// password and an unknown email produce the same 401 message.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Extension, Json};
use questify_shared::auth::{
    jwt::{create_token, Claims},
    middleware::CurrentUser,
    password::{hash_password, validate_password_strength, verify_password},
};
use questify_shared::models::user::{CreateUser, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address (must be unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password (hashed before storage)
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 255, message = "Name too long"))]
    pub name: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Authentication response payload: the user plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Json<ApiResponse<AuthPayload>>> {
    body.validate().map_err(ApiError::from_validation)?;

    validate_password_strength(&body.password).map_err(ApiError::BadRequest)?;

    let password_hash = hash_password(&body.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: body.email,
            password_hash: Some(password_hash),
            google_id: None,
            name: body.name,
            avatar_url: None,
        },
    )
    .await?;

    let token = create_token(&Claims::new(user.id, user.role), state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(ApiResponse::ok(
        "User registered successfully",
        AuthPayload { user, token },
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthPayload>>> {
    body.validate().map_err(ApiError::from_validation)?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &body.email)
        .await?
        .ok_or_else(invalid)?;

    // Google-only accounts have no password hash and can't log in here
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;

    if !verify_password(&body.password, hash)? {
        return Err(invalid());
    }

    User::update_last_login(&state.db, user.id).await?;

    let token = create_token(&Claims::new(user.id, user.role), state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiResponse::ok(
        "Login successful",
        AuthPayload { user, token },
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = User::find_by_id(&state.db, current.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::ok("Current user", user))
}
