//! Home shell — bottom-tab navigation over the main screens.

use std::sync::Arc;

use crate::auth::{Session, SessionContext};
use crate::profile::{ProfileRecord, ProfileStore};

use super::router::{Guard, Route, guard_protected};

/// Tabs on the fixed bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Today,
    Habits,
    Community,
    Reports,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Self::Today,
        Self::Habits,
        Self::Community,
        Self::Reports,
        Self::Profile,
    ];

    /// Label shown under the tab icon.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Hoje",
            Self::Habits => "Hábitos",
            Self::Community => "Comunidade",
            Self::Reports => "Relatórios",
            Self::Profile => "Perfil",
        }
    }
}

/// The tabbed home screen, mounted only after the guard passes. The session
/// and profile are resolved once at mount and handed to every tab.
pub struct HomeScreen {
    session: Session,
    profile: ProfileRecord,
    tab: Tab,
}

impl HomeScreen {
    /// Resolve session and profile, redirecting when either gate fails.
    pub async fn mount(
        ctx: &SessionContext,
        profiles: &Arc<dyn ProfileStore>,
    ) -> Result<Self, Route> {
        match guard_protected(ctx, profiles).await {
            Guard::Proceed { session, profile } => Ok(Self {
                session,
                profile,
                tab: Tab::Today,
            }),
            Guard::RedirectLogin => Err(Route::Login),
            Guard::RedirectQuiz => Err(Route::Quiz),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profile(&self) -> &ProfileRecord {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthClient;
    use crate::backend::MemoryBackend;
    use crate::quiz::QuizAnswers;

    #[tokio::test]
    async fn mount_starts_on_today_and_switches_tabs() {
        let backend = Arc::new(MemoryBackend::new());
        let ctx = SessionContext::new(backend.clone() as Arc<dyn AuthClient>);
        let profiles = backend.clone() as Arc<dyn ProfileStore>;

        let user = backend.sign_up("ana@example.com", "segredo1", "Ana").await.unwrap();
        profiles
            .upsert_quiz_answers(user.user_id, &QuizAnswers::default())
            .await
            .unwrap();

        let mut screen = HomeScreen::mount(&ctx, &profiles).await.unwrap();
        assert_eq!(screen.tab(), Tab::Today);
        screen.select_tab(Tab::Reports);
        assert_eq!(screen.tab(), Tab::Reports);
        assert!(screen.profile().is_complete());
    }

    #[tokio::test]
    async fn mount_redirects_like_the_dashboard() {
        let backend = Arc::new(MemoryBackend::new());
        let ctx = SessionContext::new(backend.clone() as Arc<dyn AuthClient>);
        let profiles = backend.clone() as Arc<dyn ProfileStore>;

        assert!(matches!(
            HomeScreen::mount(&ctx, &profiles).await,
            Err(Route::Login)
        ));

        backend.sign_up("ana@example.com", "segredo1", "Ana").await.unwrap();
        assert!(matches!(
            HomeScreen::mount(&ctx, &profiles).await,
            Err(Route::Quiz)
        ));
    }

    #[test]
    fn tab_labels() {
        let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec!["Hoje", "Hábitos", "Comunidade", "Relatórios", "Perfil"]
        );
    }
}
