//! Session context — the single resolution point for the current identity.

use std::sync::Arc;

use crate::error::AuthError;

use super::client::{AuthClient, Session};

/// Carries the auth client into each screen so session lookups flow through
/// one place instead of ad hoc calls scattered per screen.
///
/// Screens receive a `SessionContext` at initialization and resolve the
/// session when they mount or submit; nothing is cached across screens.
#[derive(Clone)]
pub struct SessionContext {
    auth: Arc<dyn AuthClient>,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self { auth }
    }

    /// Resolve the current session from the auth service.
    pub async fn resolve(&self) -> Result<Option<Session>, AuthError> {
        self.auth.current_session().await
    }

    /// Resolve, treating a missing session as an error.
    pub async fn require(&self) -> Result<Session, AuthError> {
        self.resolve().await?.ok_or(AuthError::NotAuthenticated)
    }

    /// The underlying auth client, for account operations (sign in/out).
    pub fn client(&self) -> &Arc<dyn AuthClient> {
        &self.auth
    }
}
