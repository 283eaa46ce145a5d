//! In-memory backend — volatile auth and profile storage.
//!
//! Used by the tests and by the binary when no hosted backend is configured.
//! Nothing survives the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{AuthClient, Session};
use crate::avatar::AvatarAppearance;
use crate::error::{AuthError, ProfileError};
use crate::profile::{ProfileRecord, ProfileStore};
use crate::quiz::QuizAnswers;

struct Account {
    user_id: Uuid,
    email: String,
    password: String,
    display_name: String,
}

#[derive(Default)]
struct MemoryState {
    accounts: Vec<Account>,
    /// The signed-in user, when any.
    current: Option<Uuid>,
    /// One profile row per user, keyed like the hosted table.
    profiles: HashMap<Uuid, ProfileRecord>,
}

/// Volatile backend implementing both service interfaces.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_for(account: &Account) -> Session {
        Session {
            user_id: account.user_id,
            email: account.email.clone(),
            display_name: Some(account.display_name.clone()),
            access_token: SecretString::from(format!("mem-{}", account.user_id)),
        }
    }

    /// Number of profile rows stored (test helper).
    pub async fn profile_count(&self) -> usize {
        self.state.read().await.profiles.len()
    }
}

#[async_trait]
impl AuthClient for MemoryBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let mut state = self.state.write().await;
        if state.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::Api {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        let account = Account {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        };
        let session = Self::session_for(&account);
        state.current = Some(account.user_id);
        state.accounts.push(account);
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut state = self.state.write().await;
        let Some(account) = state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
        else {
            return Err(AuthError::InvalidCredentials);
        };
        let session = Self::session_for(account);
        state.current = Some(session.user_id);
        Ok(session)
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        // Accepted silently, like the hosted service (no account disclosure)
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let state = self.state.read().await;
        let session = state
            .current
            .and_then(|id| state.accounts.iter().find(|a| a.user_id == id))
            .map(Self::session_for);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.state.write().await.current = None;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn upsert_quiz_answers(
        &self,
        user_id: Uuid,
        answers: &QuizAnswers,
    ) -> Result<(), ProfileError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        state
            .profiles
            .entry(user_id)
            .and_modify(|row| {
                row.quiz_data = Some(answers.clone());
                row.completed_quiz = true;
                row.updated_at = now;
            })
            .or_insert_with(|| ProfileRecord {
                user_id,
                quiz_data: Some(answers.clone()),
                avatar_data: None,
                completed_quiz: true,
                updated_at: now,
            });
        Ok(())
    }

    async fn update_avatar(
        &self,
        user_id: Uuid,
        appearance: &AvatarAppearance,
    ) -> Result<(), ProfileError> {
        let mut state = self.state.write().await;
        // A filtered update on a missing row matches zero rows and succeeds
        if let Some(row) = state.profiles.get_mut(&user_id) {
            row.avatar_data = Some(appearance.clone());
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, ProfileError> {
        Ok(self.state.read().await.profiles.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_session_resolves() {
        let backend = MemoryBackend::new();
        let session = backend.sign_up("bia@example.com", "senha123", "Bia").await.unwrap();
        let current = backend.current_session().await.unwrap().unwrap();
        assert_eq!(current.user_id, session.user_id);
        assert_eq!(current.display_name.as_deref(), Some("Bia"));
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let backend = MemoryBackend::new();
        backend.sign_up("bia@example.com", "senha123", "Bia").await.unwrap();
        let err = backend
            .sign_up("bia@example.com", "outra", "Bia")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Api { status: 422, .. }));
    }

    #[tokio::test]
    async fn sign_in_with_wrong_password_fails() {
        let backend = MemoryBackend::new();
        backend.sign_up("bia@example.com", "senha123", "Bia").await.unwrap();
        backend.sign_out().await.unwrap();

        let err = backend.sign_in("bia@example.com", "errada").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(backend.current_session().await.unwrap().is_none());

        backend.sign_in("bia@example.com", "senha123").await.unwrap();
        assert!(backend.current_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn upsert_creates_then_merges() {
        let backend = MemoryBackend::new();
        let user_id = Uuid::new_v4();
        let answers = QuizAnswers::default();

        backend.upsert_quiz_answers(user_id, &answers).await.unwrap();
        backend
            .update_avatar(user_id, &AvatarAppearance::default())
            .await
            .unwrap();

        // A second quiz upsert keeps the avatar data in place
        backend.upsert_quiz_answers(user_id, &answers).await.unwrap();
        let row = backend.fetch_profile(user_id).await.unwrap().unwrap();
        assert!(row.completed_quiz);
        assert!(row.avatar_data.is_some());
        assert_eq!(backend.profile_count().await, 1);
    }

    #[tokio::test]
    async fn update_avatar_without_row_is_a_noop() {
        let backend = MemoryBackend::new();
        let user_id = Uuid::new_v4();
        backend
            .update_avatar(user_id, &AvatarAppearance::default())
            .await
            .unwrap();
        assert!(backend.fetch_profile(user_id).await.unwrap().is_none());
    }
}
