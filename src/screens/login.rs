//! Login screen flow.

use std::sync::Arc;

use crate::auth::{AuthClient, Session};
use crate::error::AuthError;

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Signed in; the caller should open the dashboard.
    Success(Session),
    Failed(AuthError),
    /// An attempt is already in flight.
    Busy,
}

/// Form state and submit logic for the login screen.
pub struct LoginScreen {
    auth: Arc<dyn AuthClient>,
    pub email: String,
    pub password: String,
    busy: bool,
}

impl LoginScreen {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self {
            auth,
            email: String::new(),
            password: String::new(),
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub async fn submit(&mut self) -> LoginOutcome {
        if self.busy {
            return LoginOutcome::Busy;
        }
        self.busy = true;
        let result = self.auth.sign_in(&self.email, &self.password).await;
        self.busy = false;
        match result {
            Ok(session) => LoginOutcome::Success(session),
            Err(e) => LoginOutcome::Failed(e),
        }
    }
}
