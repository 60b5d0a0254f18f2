/// Google OAuth sign-in
///
/// Implements the authorization-code redirect flow without server-side
/// sessions: the callback mints a first-party JWT and hands it to the
/// frontend via a redirect to `{client_url}/auth/callback?token=...`. Users
/// are looked up by their Google account id and created on first login.
///
/// The `state` parameter is a short-lived signed token, so the callback
/// only accepts flows this server started recently. Callback failures
/// (denied consent, bad state, an email already registered with a password)
/// redirect back to the frontend with an `error` code instead of surfacing
/// a JSON body mid-redirect.
///
/// Both endpoints return 503 when Google credentials are not configured.

use crate::{
    app::AppState,
    config::GoogleConfig,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use chrono::Duration;
use questify_shared::auth::jwt::{create_token, validate_token, Claims};
use questify_shared::models::user::{CreateUser, User, UserRole};
use serde::Deserialize;
use uuid::Uuid;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// How long a consent round-trip may take before the state expires
const STATE_LIFETIME_MINUTES: i64 = 10;

/// Query parameters Google sends to the callback
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Token endpoint response (only the access token is used)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Userinfo endpoint response
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    /// Stable Google account id
    sub: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

fn google_config(state: &AppState) -> ApiResult<&GoogleConfig> {
    state
        .config
        .google
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Google sign-in is not configured".to_string()))
}

/// GET /auth/google
///
/// Redirects the browser to Google's consent screen.
pub async fn google_redirect(State(state): State<AppState>) -> ApiResult<Redirect> {
    let google = google_config(&state)?;

    // The state is a throwaway signed token; the callback rejects flows
    // carrying a state this server didn't mint within the last few minutes
    let nonce = Claims::with_expiration(
        Uuid::new_v4(),
        UserRole::User,
        Duration::minutes(STATE_LIFETIME_MINUTES),
    );
    let state_token = create_token(&nonce, state.jwt_secret())?;

    let url = reqwest::Url::parse_with_params(
        GOOGLE_AUTH_URL,
        &[
            ("client_id", google.client_id.as_str()),
            ("redirect_uri", google.callback_url.as_str()),
            ("response_type", "code"),
            ("scope", "openid email profile"),
            ("state", state_token.as_str()),
        ],
    )
    .map_err(|e| ApiError::InternalError(format!("Failed to build consent URL: {}", e)))?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /auth/google/callback
///
/// Exchanges the authorization code for an access token, fetches the user's
/// profile, finds or creates the local account, and redirects back to the
/// frontend with a signed JWT. Failures redirect back with an error code.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<Redirect> {
    google_config(&state)?;

    let client_url = state.config.api.client_url.trim_end_matches('/').to_string();

    match run_callback(&state, query).await {
        Ok(jwt) => Ok(Redirect::temporary(&format!(
            "{}/auth/callback?token={}",
            client_url, jwt
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            Ok(Redirect::temporary(&format!(
                "{}/auth/callback?error={}",
                client_url,
                callback_error_code(&e)
            )))
        }
    }
}

/// Maps a callback failure to the error code handed to the frontend
fn callback_error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::BadRequest(_) => "invalid_request",
        ApiError::Unauthorized(_) => "access_denied",
        ApiError::Conflict(_) => "account_exists",
        _ => "server_error",
    }
}

/// The fallible part of the callback; any error becomes an error redirect
async fn run_callback(state: &AppState, query: CallbackQuery) -> ApiResult<String> {
    let google = google_config(state)?;

    if let Some(error) = query.error {
        return Err(ApiError::Unauthorized(format!(
            "Google sign-in failed: {}",
            error
        )));
    }

    let state_token = query
        .state
        .ok_or_else(|| ApiError::BadRequest("Missing state parameter".to_string()))?;

    validate_token(&state_token, state.jwt_secret())
        .map_err(|_| ApiError::Unauthorized("Invalid or expired sign-in state".to_string()))?;

    let code = query
        .code
        .ok_or_else(|| ApiError::BadRequest("Missing authorization code".to_string()))?;

    let client = reqwest::Client::new();

    let token: TokenResponse = client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("code", code.as_str()),
            ("client_id", google.client_id.as_str()),
            ("client_secret", google.client_secret.as_str()),
            ("redirect_uri", google.callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let info: GoogleUserInfo = client
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(&token.access_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let user = match User::find_by_google_id(&state.db, &info.sub).await? {
        Some(user) => user,
        None => {
            // A duplicate email here means the address is registered as a
            // password account; the insert's unique violation maps to
            // Conflict and reaches the frontend as account_exists
            let user = User::create(
                &state.db,
                CreateUser {
                    email: info.email,
                    password_hash: None,
                    google_id: Some(info.sub),
                    name: info.name,
                    avatar_url: info.picture,
                },
            )
            .await?;

            tracing::info!(user_id = %user.id, "User created via Google sign-in");
            user
        }
    };

    User::update_last_login(&state.db, user.id).await?;

    create_token(&Claims::new(user.id, user.role), state.jwt_secret()).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_error_codes() {
        assert_eq!(
            callback_error_code(&ApiError::BadRequest("x".into())),
            "invalid_request"
        );
        assert_eq!(
            callback_error_code(&ApiError::Unauthorized("x".into())),
            "access_denied"
        );
        assert_eq!(
            callback_error_code(&ApiError::Conflict("x".into())),
            "account_exists"
        );
        assert_eq!(
            callback_error_code(&ApiError::InternalError("x".into())),
            "server_error"
        );
    }
}
