//! Dashboard — the post-login overview with the logout action.

use std::sync::Arc;

use crate::auth::{Session, SessionContext};
use crate::error::AuthError;
use crate::profile::ProfileStore;

use super::router::{Guard, Route, guard_protected};

/// The dashboard screen, mounted only after the guard passes.
pub struct DashboardScreen {
    session: Session,
}

impl DashboardScreen {
    /// Resolve session and profile, redirecting when either gate fails.
    pub async fn mount(
        ctx: &SessionContext,
        profiles: &Arc<dyn ProfileStore>,
    ) -> Result<Self, Route> {
        match guard_protected(ctx, profiles).await {
            Guard::Proceed { session, .. } => Ok(Self { session }),
            Guard::RedirectLogin => Err(Route::Login),
            Guard::RedirectQuiz => Err(Route::Quiz),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Name used in the header greeting.
    pub fn greeting_name(&self) -> &str {
        self.session.display_name.as_deref().unwrap_or("Usuário")
    }

    /// Sign the user out. The caller routes back to login on success.
    pub async fn sign_out(&self, ctx: &SessionContext) -> Result<(), AuthError> {
        ctx.client().sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthClient;
    use crate::backend::MemoryBackend;
    use crate::quiz::QuizAnswers;

    #[tokio::test]
    async fn mount_redirects_before_quiz_completion() {
        let backend = Arc::new(MemoryBackend::new());
        let ctx = SessionContext::new(backend.clone() as Arc<dyn AuthClient>);
        let profiles = backend.clone() as Arc<dyn ProfileStore>;

        // Signed out entirely
        assert!(matches!(
            DashboardScreen::mount(&ctx, &profiles).await,
            Err(Route::Login)
        ));

        // Signed in, quiz pending
        backend.sign_up("ana@example.com", "segredo1", "Ana").await.unwrap();
        assert!(matches!(
            DashboardScreen::mount(&ctx, &profiles).await,
            Err(Route::Quiz)
        ));
    }

    #[tokio::test]
    async fn mount_greets_by_display_name_and_signs_out() {
        let backend = Arc::new(MemoryBackend::new());
        let ctx = SessionContext::new(backend.clone() as Arc<dyn AuthClient>);
        let profiles = backend.clone() as Arc<dyn ProfileStore>;

        let user = backend.sign_up("ana@example.com", "segredo1", "Ana").await.unwrap();
        profiles
            .upsert_quiz_answers(user.user_id, &QuizAnswers::default())
            .await
            .unwrap();

        let screen = DashboardScreen::mount(&ctx, &profiles).await.unwrap();
        assert_eq!(screen.greeting_name(), "Ana");

        screen.sign_out(&ctx).await.unwrap();
        assert!(backend.current_session().await.unwrap().is_none());
    }
}
