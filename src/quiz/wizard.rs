//! Quiz wizard — the step state machine behind the onboarding questionnaire.

use std::sync::Arc;

use crate::auth::SessionContext;
use crate::error::ValidationError;
use crate::profile::ProfileStore;

use super::model::{MultiSelectField, QuizAnswers};

/// The six steps of the quiz.
///
/// Progresses linearly: Goals → BodyMetrics → ActivityLevel →
/// HealthRestrictions → PhysicalLimitations → Preferences. Confirming the
/// last step submits the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Goals,
    BodyMetrics,
    ActivityLevel,
    HealthRestrictions,
    PhysicalLimitations,
    Preferences,
}

impl QuizStep {
    pub const TOTAL: u8 = 6;

    /// One-based position, for "Etapa X de 6" headers.
    pub fn index(&self) -> u8 {
        match self {
            Self::Goals => 1,
            Self::BodyMetrics => 2,
            Self::ActivityLevel => 3,
            Self::HealthRestrictions => 4,
            Self::PhysicalLimitations => 5,
            Self::Preferences => 6,
        }
    }

    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<QuizStep> {
        match self {
            Self::Goals => Some(Self::BodyMetrics),
            Self::BodyMetrics => Some(Self::ActivityLevel),
            Self::ActivityLevel => Some(Self::HealthRestrictions),
            Self::HealthRestrictions => Some(Self::PhysicalLimitations),
            Self::PhysicalLimitations => Some(Self::Preferences),
            Self::Preferences => None,
        }
    }

    /// The previous step, if any.
    pub fn prev(&self) -> Option<QuizStep> {
        match self {
            Self::Goals => None,
            Self::BodyMetrics => Some(Self::Goals),
            Self::ActivityLevel => Some(Self::BodyMetrics),
            Self::HealthRestrictions => Some(Self::ActivityLevel),
            Self::PhysicalLimitations => Some(Self::HealthRestrictions),
            Self::Preferences => Some(Self::PhysicalLimitations),
        }
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Preferences)
    }

    /// Required-field rule for leaving this step forward. Steps four through
    /// six have no required fields.
    fn validate(&self, answers: &QuizAnswers) -> Result<(), ValidationError> {
        match self {
            Self::Goals => {
                if answers.primary_goals.is_empty() {
                    return Err(ValidationError::NoPrimaryGoal);
                }
                Ok(())
            }
            Self::BodyMetrics => {
                if answers.weight_kg.is_empty()
                    || answers.height_cm.is_empty()
                    || answers.age.is_empty()
                {
                    return Err(ValidationError::IncompleteBodyMetrics);
                }
                Ok(())
            }
            Self::ActivityLevel => {
                if answers.activity_level.is_none() {
                    return Err(ValidationError::NoActivityLevel);
                }
                Ok(())
            }
            Self::HealthRestrictions | Self::PhysicalLimitations | Self::Preferences => Ok(()),
        }
    }
}

/// Result of an [`QuizWizard::advance`] call.
#[derive(Debug)]
pub enum Advance {
    /// A required field is missing; the wizard stays put and the error is
    /// also kept in [`QuizWizard::last_error`].
    Rejected(ValidationError),
    /// Moved forward to the given step.
    Moved(QuizStep),
    /// Final submission succeeded; the caller should open the avatar screen.
    Completed,
    /// No authenticated session; the caller should redirect to login.
    Unauthenticated,
    /// The profile write failed; the wizard stays on the last step so the
    /// same submission can be retried.
    Failed,
    /// A submission is already in flight.
    Busy,
}

/// Drives the quiz: owns the answers record for the lifetime of the screen,
/// gates forward navigation on per-step validation, and performs the final
/// upsert.
pub struct QuizWizard {
    session: SessionContext,
    profiles: Arc<dyn ProfileStore>,
    step: QuizStep,
    answers: QuizAnswers,
    last_error: Option<ValidationError>,
    busy: bool,
}

impl QuizWizard {
    pub fn new(session: SessionContext, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            session,
            profiles,
            step: QuizStep::Goals,
            answers: QuizAnswers::default(),
            last_error: None,
            busy: false,
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Mutable access for the field setters on [`QuizAnswers`].
    pub fn answers_mut(&mut self) -> &mut QuizAnswers {
        &mut self.answers
    }

    /// The validation error from the last rejected `advance`, if any.
    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Toggle a token on one of the multi-select fields.
    pub fn toggle(&mut self, field: MultiSelectField, token: &str) {
        self.answers.toggle(field, token);
    }

    /// Move one step back. Nothing is validated and nothing is cleared.
    /// Returns `false` on the first step or while a submission is in flight.
    pub fn retreat(&mut self) -> bool {
        if self.busy {
            return false;
        }
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Validate the current step and move forward; on the last step, submit
    /// the full record instead.
    pub async fn advance(&mut self) -> Advance {
        if self.busy {
            return Advance::Busy;
        }
        if let Err(e) = self.step.validate(&self.answers) {
            self.last_error = Some(e.clone());
            return Advance::Rejected(e);
        }
        self.last_error = None;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::Moved(next)
            }
            None => self.submit().await,
        }
    }

    async fn submit(&mut self) -> Advance {
        self.busy = true;
        let outcome = self.submit_inner().await;
        self.busy = false;
        outcome
    }

    /// Resolve the session, then upsert the full answers record keyed by the
    /// user id. Retrying after a failure re-sends the identical record.
    async fn submit_inner(&mut self) -> Advance {
        let user = match self.session.resolve().await {
            Ok(Some(user)) => user,
            Ok(None) => return Advance::Unauthenticated,
            Err(e) => {
                tracing::warn!("Session lookup failed during quiz submit: {e}");
                return Advance::Failed;
            }
        };
        match self
            .profiles
            .upsert_quiz_answers(user.user_id, &self.answers)
            .await
        {
            Ok(()) => Advance::Completed,
            Err(e) => {
                tracing::warn!("Failed to save quiz answers: {e}");
                Advance::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::auth::AuthClient;
    use crate::backend::MemoryBackend;
    use crate::error::ProfileError;
    use crate::profile::ProfileRecord;
    use crate::quiz::model::ActivityLevel;

    async fn signed_in_backend() -> Arc<MemoryBackend> {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .sign_up("ana@example.com", "segredo1", "Ana")
            .await
            .unwrap();
        backend
    }

    fn wizard_over(backend: &Arc<MemoryBackend>) -> QuizWizard {
        let ctx = SessionContext::new(backend.clone() as Arc<dyn crate::auth::AuthClient>);
        QuizWizard::new(ctx, backend.clone() as Arc<dyn ProfileStore>)
    }

    fn fill_required(wizard: &mut QuizWizard) {
        wizard.toggle(MultiSelectField::PrimaryGoals, "Perder peso");
        wizard.answers_mut().set_weight_kg("70");
        wizard.answers_mut().set_height_cm("170");
        wizard.answers_mut().set_age("30");
        wizard.answers_mut().set_activity_level(ActivityLevel::Moderate);
    }

    #[tokio::test]
    async fn advance_blocked_without_primary_goal() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);

        let before = wizard.answers().clone();
        let outcome = wizard.advance().await;
        assert!(matches!(
            outcome,
            Advance::Rejected(ValidationError::NoPrimaryGoal)
        ));
        assert_eq!(wizard.step(), QuizStep::Goals);
        assert_eq!(wizard.answers(), &before, "rejection must not mutate answers");
        assert_eq!(wizard.last_error(), Some(&ValidationError::NoPrimaryGoal));
    }

    #[tokio::test]
    async fn advance_blocked_on_partial_body_metrics() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);
        wizard.toggle(MultiSelectField::PrimaryGoals, "Dormir melhor");
        assert!(matches!(wizard.advance().await, Advance::Moved(QuizStep::BodyMetrics)));

        // Weight alone is not enough
        wizard.answers_mut().set_weight_kg("70");
        let outcome = wizard.advance().await;
        assert!(matches!(
            outcome,
            Advance::Rejected(ValidationError::IncompleteBodyMetrics)
        ));
        assert_eq!(wizard.step(), QuizStep::BodyMetrics);
    }

    #[tokio::test]
    async fn advance_blocked_without_activity_level() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);
        wizard.toggle(MultiSelectField::PrimaryGoals, "Dormir melhor");
        wizard.answers_mut().set_weight_kg("70");
        wizard.answers_mut().set_height_cm("170");
        wizard.answers_mut().set_age("30");
        wizard.advance().await;
        wizard.advance().await;
        assert_eq!(wizard.step(), QuizStep::ActivityLevel);

        let outcome = wizard.advance().await;
        assert!(matches!(
            outcome,
            Advance::Rejected(ValidationError::NoActivityLevel)
        ));
        assert_eq!(wizard.step(), QuizStep::ActivityLevel);
    }

    #[tokio::test]
    async fn later_steps_advance_with_everything_optional() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);
        fill_required(&mut wizard);

        wizard.advance().await;
        wizard.advance().await;
        wizard.advance().await;
        assert_eq!(wizard.step(), QuizStep::HealthRestrictions);

        // Nothing filled in on steps four and five, both still advance
        assert!(matches!(
            wizard.advance().await,
            Advance::Moved(QuizStep::PhysicalLimitations)
        ));
        assert!(matches!(
            wizard.advance().await,
            Advance::Moved(QuizStep::Preferences)
        ));
    }

    #[tokio::test]
    async fn retreat_preserves_answers() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);
        fill_required(&mut wizard);
        wizard.advance().await;
        wizard.advance().await;
        assert_eq!(wizard.step(), QuizStep::ActivityLevel);

        assert!(wizard.retreat());
        assert_eq!(wizard.step(), QuizStep::BodyMetrics);
        assert_eq!(wizard.answers().weight_kg, "70");

        // Forward again with the data still in place
        assert!(matches!(
            wizard.advance().await,
            Advance::Moved(QuizStep::ActivityLevel)
        ));
        assert_eq!(wizard.answers().activity_level, Some(ActivityLevel::Moderate));
    }

    #[tokio::test]
    async fn retreat_is_noop_on_first_step() {
        let backend = signed_in_backend().await;
        let mut wizard = wizard_over(&backend);
        assert!(!wizard.retreat());
        assert_eq!(wizard.step(), QuizStep::Goals);
    }

    #[tokio::test]
    async fn submit_without_session_never_writes() {
        let backend = Arc::new(MemoryBackend::new());
        let mut wizard = wizard_over(&backend);
        fill_required(&mut wizard);
        for _ in 0..5 {
            wizard.advance().await;
        }
        assert_eq!(wizard.step(), QuizStep::Preferences);

        let outcome = wizard.advance().await;
        assert!(matches!(outcome, Advance::Unauthenticated));
        assert_eq!(backend.profile_count().await, 0);
    }

    #[tokio::test]
    async fn submit_upserts_full_record_with_completed_flag() {
        let backend = signed_in_backend().await;
        let user = backend.current_session().await.unwrap().unwrap();
        let mut wizard = wizard_over(&backend);
        fill_required(&mut wizard);
        wizard.toggle(MultiSelectField::DietaryRestrictions, "Vegano");
        wizard.answers_mut().set_accepts_notifications(true);
        for _ in 0..5 {
            wizard.advance().await;
        }

        assert!(matches!(wizard.advance().await, Advance::Completed));

        let profile = backend
            .fetch_profile(user.user_id)
            .await
            .unwrap()
            .expect("profile row created");
        assert!(profile.completed_quiz);
        let stored = profile.quiz_data.expect("quiz answers stored");
        assert_eq!(stored, *wizard.answers());
        assert_eq!(stored.dietary_restrictions, vec!["Vegano"]);
    }

    /// Fails a configurable number of writes, then delegates to memory.
    struct FlakyStore {
        inner: Arc<MemoryBackend>,
        failures_left: AtomicUsize,
        upsert_calls: AtomicUsize,
    }

    #[async_trait]
    impl ProfileStore for FlakyStore {
        async fn upsert_quiz_answers(
            &self,
            user_id: Uuid,
            answers: &QuizAnswers,
        ) -> Result<(), ProfileError> {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(ProfileError::Http("connection reset".to_string()));
            }
            self.inner.upsert_quiz_answers(user_id, answers).await
        }

        async fn update_avatar(
            &self,
            user_id: Uuid,
            appearance: &crate::avatar::AvatarAppearance,
        ) -> Result<(), ProfileError> {
            self.inner.update_avatar(user_id, appearance).await
        }

        async fn fetch_profile(
            &self,
            user_id: Uuid,
        ) -> Result<Option<ProfileRecord>, ProfileError> {
            self.inner.fetch_profile(user_id).await
        }
    }

    #[tokio::test]
    async fn failed_submit_stays_on_last_step_and_retries_identically() {
        let backend = signed_in_backend().await;
        let user = backend.current_session().await.unwrap().unwrap();
        let store = Arc::new(FlakyStore {
            inner: backend.clone(),
            failures_left: AtomicUsize::new(1),
            upsert_calls: AtomicUsize::new(0),
        });
        let ctx = SessionContext::new(backend.clone() as Arc<dyn crate::auth::AuthClient>);
        let mut wizard = QuizWizard::new(ctx, store.clone());
        fill_required(&mut wizard);
        for _ in 0..5 {
            wizard.advance().await;
        }

        assert!(matches!(wizard.advance().await, Advance::Failed));
        assert_eq!(wizard.step(), QuizStep::Preferences);
        assert!(!wizard.is_busy(), "busy flag must clear after a failure");

        // Retry re-sends the identical record and lands it
        assert!(matches!(wizard.advance().await, Advance::Completed));
        assert_eq!(store.upsert_calls.load(Ordering::SeqCst), 2);
        let profile = backend.fetch_profile(user.user_id).await.unwrap().unwrap();
        assert_eq!(profile.quiz_data.as_ref(), Some(wizard.answers()));
    }

    #[tokio::test]
    async fn step_walk_covers_all_six() {
        let mut current = QuizStep::Goals;
        let mut seen = vec![current];
        while let Some(next) = current.next() {
            seen.push(next);
            current = next;
        }
        assert_eq!(seen.len() as u8, QuizStep::TOTAL);
        assert!(current.is_last());
        assert_eq!(seen.last().unwrap().index(), 6);
    }
}
