//! Route guard — decides which screen a navigation lands on.

use std::sync::Arc;

use crate::auth::{Session, SessionContext};
use crate::profile::{ProfileRecord, ProfileStore};

/// Screens reachable by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    PasswordRecovery,
    Quiz,
    Avatar,
    Dashboard,
    Home,
}

/// Outcome of mounting a protected screen.
#[derive(Debug)]
pub enum Guard {
    /// Session and completed profile in hand; proceed.
    Proceed {
        session: Session,
        profile: ProfileRecord,
    },
    /// Not signed in.
    RedirectLogin,
    /// Signed in but onboarding is not finished.
    RedirectQuiz,
}

/// Landing decision for the app root: signed-in users go to the dashboard,
/// everyone else to login.
pub async fn entry_route(session: &SessionContext) -> Route {
    match session.resolve().await {
        Ok(Some(_)) => Route::Dashboard,
        Ok(None) => Route::Login,
        Err(e) => {
            tracing::warn!("Session lookup failed at entry: {e}");
            Route::Login
        }
    }
}

/// Resolve the session and profile for a protected screen.
///
/// Unauthenticated access redirects to login; an authenticated user with a
/// missing or incomplete profile is sent back to the quiz. Lookup failures
/// fall back to the login redirect rather than crashing the screen.
pub async fn guard_protected(
    session: &SessionContext,
    profiles: &Arc<dyn ProfileStore>,
) -> Guard {
    let user = match session.resolve().await {
        Ok(Some(user)) => user,
        Ok(None) => return Guard::RedirectLogin,
        Err(e) => {
            tracing::warn!("Session lookup failed: {e}");
            return Guard::RedirectLogin;
        }
    };
    match profiles.fetch_profile(user.user_id).await {
        Ok(Some(profile)) if profile.is_complete() => Guard::Proceed {
            session: user,
            profile,
        },
        Ok(_) => Guard::RedirectQuiz,
        Err(e) => {
            tracing::warn!("Profile lookup failed: {e}");
            Guard::RedirectLogin
        }
    }
}
