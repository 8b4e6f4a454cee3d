//! Authentication ports.

use uuid::Uuid;

/// Issues bearer tokens at register and login.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-limited token for a user.
    fn generate_token(&self, user_id: Uuid, email: &str, username: &str)
    -> Result<String, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;

    /// Spend the same work as [`PasswordService::verify`] when there is no
    /// stored hash to check against.
    fn verify_unknown(&self, password: &str);
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
