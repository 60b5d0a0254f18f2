/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: JWT token generation and validation (HS256)
/// - [`middleware`]: Request auth context and credential extraction
///
/// # Example
///
/// ```no_run
/// use questify_shared::auth::password::{hash_password, verify_password};
/// use questify_shared::auth::jwt::{create_token, Claims};
/// use questify_shared::models::user::UserRole;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), UserRole::User);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
