/// Request authentication context
///
/// The API server validates a Bearer JWT per-request, loads the user, and
/// inserts a [`CurrentUser`] into request extensions. Handlers extract it
/// with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use questify_shared::auth::middleware::CurrentUser;
///
/// async fn handler(Extension(auth): Extension<CurrentUser>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::{User, UserRole};

/// Authenticated user attached to the request after JWT validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// User role at the time the user row was loaded
    pub role: UserRole,
}

impl CurrentUser {
    /// Builds the auth context from a freshly loaded user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }

    /// Whether this user may act on resources owned by `owner_id`
    ///
    /// Admins may act on any user's resources; everyone else only on their
    /// own.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.role == UserRole::Admin || self.user_id == owner_id
    }

    /// Whether this user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),

    /// Token was valid but the user no longer exists
    UserNotFound,

    /// Database error while loading the user
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "User not found - invalid token").into_response()
            }
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Extracts a Bearer token from request headers
///
/// # Errors
///
/// - `AuthError::MissingCredentials` when there is no Authorization header
/// - `AuthError::InvalidFormat` when the header isn't `Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_user(role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_can_access_own_resources() {
        let user = test_user(UserRole::User);
        assert!(user.can_access(user.user_id));
        assert!(!user.can_access(Uuid::new_v4()));
    }

    #[test]
    fn test_admin_can_access_anything() {
        let admin = test_user(UserRole::Admin);
        assert!(admin.is_admin());
        assert!(admin.can_access(Uuid::new_v4()));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );

        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::MissingCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidFormat("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::UserNotFound.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::DatabaseError("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
