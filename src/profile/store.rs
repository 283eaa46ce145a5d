//! Profile persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::avatar::AvatarAppearance;
use crate::error::ProfileError;
use crate::quiz::QuizAnswers;

use super::model::ProfileRecord;

/// Backend-agnostic interface to the profile table.
///
/// The quiz creates (or merges into) the row with an upsert; the avatar
/// screen writes into the row the quiz created; the home screens read the
/// row to decide whether onboarding is done.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Merge the quiz answers into the user's profile row, creating the row
    /// if absent, and mark the quiz as completed.
    async fn upsert_quiz_answers(
        &self,
        user_id: Uuid,
        answers: &QuizAnswers,
    ) -> Result<(), ProfileError>;

    /// Write the avatar appearance into the user's existing profile row.
    async fn update_avatar(
        &self,
        user_id: Uuid,
        appearance: &AvatarAppearance,
    ) -> Result<(), ProfileError>;

    /// Fetch the profile row, or `None` when the user has no profile yet.
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, ProfileError>;
}
