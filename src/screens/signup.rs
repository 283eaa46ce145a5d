//! Signup screen flow.

use std::sync::Arc;

use crate::auth::{AuthClient, Session};
use crate::error::{AuthError, ValidationError};

/// Result of a signup attempt.
#[derive(Debug)]
pub enum SignupOutcome {
    /// Account created and signed in; the caller should open the quiz.
    Success(Session),
    /// A local check failed; nothing was sent to the service.
    Rejected(ValidationError),
    Failed(AuthError),
    /// An attempt is already in flight.
    Busy,
}

/// Form state and submit logic for the signup screen.
pub struct SignupScreen {
    auth: Arc<dyn AuthClient>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    busy: bool,
}

impl SignupScreen {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self {
            auth,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Live requirement hints shown under the password field.
    pub fn password_requirements(&self) -> [(bool, &'static str); 2] {
        [
            (self.password.chars().count() >= 6, "Mínimo 6 caracteres"),
            (
                !self.password.is_empty() && self.password == self.confirm_password,
                "Senhas coincidem",
            ),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }

    pub async fn submit(&mut self) -> SignupOutcome {
        if self.busy {
            return SignupOutcome::Busy;
        }
        if let Err(e) = self.validate() {
            return SignupOutcome::Rejected(e);
        }
        self.busy = true;
        let result = self
            .auth
            .sign_up(&self.email, &self.password, &self.name)
            .await;
        self.busy = false;
        match result {
            Ok(session) => SignupOutcome::Success(session),
            Err(e) => SignupOutcome::Failed(e),
        }
    }
}
