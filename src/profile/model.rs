//! Stored profile row shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::avatar::AvatarAppearance;
use crate::quiz::QuizAnswers;

/// A row in the external `user_profiles` table, keyed by the auth user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_data: Option<QuizAnswers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_data: Option<AvatarAppearance>,
    #[serde(default)]
    pub completed_quiz: bool,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Whether onboarding finished and the home screens may load.
    pub fn is_complete(&self) -> bool {
        self.completed_quiz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_row() {
        // A row created by the quiz upsert has no avatar data yet
        let json = serde_json::json!({
            "user_id": "7f9c3a52-67a1-4f0e-9f9d-2b6f6f3a1c11",
            "quiz_data": { "objetivos": ["Perder peso"], "peso": "70", "altura": "170", "idade": "30", "nivelAtividade": "leve", "medicamentos": "", "outrosProblemas": "" },
            "completed_quiz": true,
            "updated_at": "2024-06-01T12:00:00Z"
        });
        let record: ProfileRecord = serde_json::from_value(json).unwrap();
        assert!(record.is_complete());
        assert!(record.avatar_data.is_none());
        assert_eq!(record.quiz_data.unwrap().primary_goals, vec!["Perder peso"]);
    }
}
