//! Auth service interface.

use async_trait::async_trait;
use secrecy::SecretString;
use uuid::Uuid;

use crate::error::AuthError;

/// An authenticated identity resolved from the auth service.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    /// Display name collected at signup, when present.
    pub display_name: Option<String>,
    /// Bearer token for subsequent service calls.
    pub access_token: SecretString,
}

/// Client for the external auth service.
///
/// Every screen talks to the service through this trait; the concrete
/// implementation lives in [`crate::backend`].
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Create an account and sign the new user in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Send a password-recovery email.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Resolve the current session, or `None` when signed out or expired.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Drop the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
