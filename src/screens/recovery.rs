//! Password recovery screen flow.

use std::sync::Arc;

use crate::auth::AuthClient;
use crate::error::AuthError;

/// Result of a recovery request.
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// The recovery email was sent; the screen switches to its confirmation
    /// state.
    Sent,
    Failed(AuthError),
    /// A request is already in flight.
    Busy,
}

/// Form state and submit logic for the password recovery screen.
pub struct PasswordRecoveryScreen {
    auth: Arc<dyn AuthClient>,
    pub email: String,
    email_sent: bool,
    busy: bool,
}

impl PasswordRecoveryScreen {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self {
            auth,
            email: String::new(),
            email_sent: false,
            busy: false,
        }
    }

    /// Whether the confirmation state should be shown instead of the form.
    pub fn email_sent(&self) -> bool {
        self.email_sent
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub async fn submit(&mut self) -> RecoveryOutcome {
        if self.busy {
            return RecoveryOutcome::Busy;
        }
        self.busy = true;
        let result = self.auth.request_password_reset(&self.email).await;
        self.busy = false;
        match result {
            Ok(()) => {
                self.email_sent = true;
                RecoveryOutcome::Sent
            }
            Err(e) => RecoveryOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn submit_flips_the_sent_flag() {
        let backend = Arc::new(MemoryBackend::new());
        let mut screen = PasswordRecoveryScreen::new(backend as Arc<dyn AuthClient>);
        screen.email = "ana@example.com".to_string();

        assert!(!screen.email_sent());
        assert!(matches!(screen.submit().await, RecoveryOutcome::Sent));
        assert!(screen.email_sent());
    }
}
