//! Onboarding quiz — a six-step questionnaire that personalizes the user's
//! plan.
//!
//! The wizard walks the user through goals, body metrics, activity level,
//! health restrictions, physical limitations, and preferences, building a
//! [`QuizAnswers`] record that is written to the profile service in a single
//! upsert when the last step is confirmed.

pub mod model;
pub mod wizard;

pub use model::{ActivityLevel, MultiSelectField, QuizAnswers, SpecificGroup};
pub use wizard::{Advance, QuizStep, QuizWizard};
