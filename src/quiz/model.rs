//! Quiz data model — the answers record and its option catalogs.
//!
//! Field and token names on the wire stay in Portuguese to match the shape
//! the profile service already stores under `quiz_data`.

use serde::{Deserialize, Serialize};

/// Self-reported physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "sedentario")]
    Sedentary,
    #[serde(rename = "leve")]
    Light,
    #[serde(rename = "moderado")]
    Moderate,
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "atleta")]
    Athlete,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::Athlete,
    ];

    /// Label shown on the selection card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentário",
            Self::Light => "Levemente ativo",
            Self::Moderate => "Moderadamente ativo",
            Self::Active => "Muito ativo",
            Self::Athlete => "Atleta",
        }
    }

    /// Helper text under the label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sedentary => "Pouca ou nenhuma atividade física",
            Self::Light => "Exercícios leves 1-3 dias/semana",
            Self::Moderate => "Exercícios moderados 3-5 dias/semana",
            Self::Active => "Exercícios intensos 6-7 dias/semana",
            Self::Athlete => "Treinos intensos diários ou profissional",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sedentary => "sedentario",
            Self::Light => "leve",
            Self::Moderate => "moderado",
            Self::Active => "ativo",
            Self::Athlete => "atleta",
        };
        write!(f, "{s}")
    }
}

/// A specific audience group the user may identify with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificGroup {
    #[serde(rename = "maes")]
    Mothers,
    #[serde(rename = "escritorio")]
    Office,
    #[serde(rename = "rapido")]
    Quick15,
    #[serde(rename = "estudante")]
    Student,
    #[serde(rename = "idoso")]
    Senior,
    #[serde(rename = "nenhum")]
    None,
}

impl SpecificGroup {
    pub const ALL: [SpecificGroup; 6] = [
        Self::Mothers,
        Self::Office,
        Self::Quick15,
        Self::Student,
        Self::Senior,
        Self::None,
    ];

    /// Label shown on the selection card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mothers => "Rotina saudável para mães",
            Self::Office => "Trabalho em escritório",
            Self::Quick15 => "Treinos de 15 minutos por dia",
            Self::Student => "Estudante",
            Self::Senior => "Terceira idade",
            Self::None => "Nenhum específico",
        }
    }
}

/// Multi-select answer fields a checkbox toggle can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelectField {
    PrimaryGoals,
    SecondaryGoals,
    DietaryRestrictions,
    ActivityDifficulties,
}

/// Everything the quiz collects, mutated in place by the wizard and written
/// as one record on submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(rename = "objetivos")]
    pub primary_goals: Vec<String>,
    /// Present in the stored shape but not collected by any step yet.
    #[serde(rename = "objetivosSecundarios", default)]
    pub secondary_goals: Vec<String>,

    // Numeric fields are kept as entered; only non-emptiness is checked.
    #[serde(rename = "peso")]
    pub weight_kg: String,
    #[serde(rename = "altura")]
    pub height_cm: String,
    #[serde(rename = "idade")]
    pub age: String,

    #[serde(rename = "nivelAtividade", default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(rename = "medicamentos")]
    pub medications: String,
    #[serde(rename = "restricoesAlimentares", default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(rename = "dificuldadesAtividade", default)]
    pub activity_difficulties: Vec<String>,
    #[serde(rename = "problemasColuna", default)]
    pub has_spine_issues: bool,
    #[serde(rename = "outrosProblemas")]
    pub other_issues: String,

    #[serde(rename = "aceitaNotificacoes", default)]
    pub accepts_notifications: bool,
    #[serde(rename = "grupoEspecifico", default)]
    pub specific_group: Option<SpecificGroup>,
}

impl QuizAnswers {
    /// Toggle a token on one of the multi-select fields: remove it when
    /// present, append it otherwise. Insertion order is preserved.
    pub fn toggle(&mut self, field: MultiSelectField, token: &str) {
        let list = match field {
            MultiSelectField::PrimaryGoals => &mut self.primary_goals,
            MultiSelectField::SecondaryGoals => &mut self.secondary_goals,
            MultiSelectField::DietaryRestrictions => &mut self.dietary_restrictions,
            MultiSelectField::ActivityDifficulties => &mut self.activity_difficulties,
        };
        if let Some(pos) = list.iter().position(|t| t == token) {
            list.remove(pos);
        } else {
            list.push(token.to_string());
        }
    }

    /// Whether a token is currently selected on the given field.
    pub fn is_selected(&self, field: MultiSelectField, token: &str) -> bool {
        let list = match field {
            MultiSelectField::PrimaryGoals => &self.primary_goals,
            MultiSelectField::SecondaryGoals => &self.secondary_goals,
            MultiSelectField::DietaryRestrictions => &self.dietary_restrictions,
            MultiSelectField::ActivityDifficulties => &self.activity_difficulties,
        };
        list.iter().any(|t| t == token)
    }

    pub fn set_weight_kg(&mut self, value: impl Into<String>) {
        self.weight_kg = value.into();
    }

    pub fn set_height_cm(&mut self, value: impl Into<String>) {
        self.height_cm = value.into();
    }

    pub fn set_age(&mut self, value: impl Into<String>) {
        self.age = value.into();
    }

    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        self.activity_level = Some(level);
    }

    pub fn set_medications(&mut self, value: impl Into<String>) {
        self.medications = value.into();
    }

    pub fn set_has_spine_issues(&mut self, value: bool) {
        self.has_spine_issues = value;
    }

    pub fn set_other_issues(&mut self, value: impl Into<String>) {
        self.other_issues = value.into();
    }

    pub fn set_accepts_notifications(&mut self, value: bool) {
        self.accepts_notifications = value;
    }

    pub fn set_specific_group(&mut self, group: SpecificGroup) {
        self.specific_group = Some(group);
    }
}

/// Goal options offered on the first step.
pub const PRIMARY_GOAL_OPTIONS: [&str; 10] = [
    "Perder peso",
    "Ganhar massa muscular",
    "Dormir melhor",
    "Reduzir ansiedade",
    "Melhorar alimentação",
    "Aumentar energia",
    "Aliviar tensão muscular",
    "Aliviar dores",
    "Aumentar flexibilidade",
    "Aumentar amplitude dos movimentos",
];

/// Dietary restriction options offered on the fourth step.
pub const DIETARY_RESTRICTION_OPTIONS: [&str; 9] = [
    "Vegetariano",
    "Vegano",
    "Intolerância à lactose",
    "Intolerância ao glúten/Celíaco",
    "Alergia a frutos do mar",
    "Alergia a amendoim/nozes",
    "Diabetes",
    "Hipertensão",
    "Colesterol alto",
];

/// Activity difficulty options offered on the fifth step.
pub const ACTIVITY_DIFFICULTY_OPTIONS: [&str; 6] = [
    "Atividades de alto impacto (corrida, pulos)",
    "Atividades que exigem flexibilidade",
    "Exercícios em pé por muito tempo",
    "Exercícios no chão",
    "Levantar peso",
    "Movimentos rápidos",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_appends_and_removes() {
        let mut answers = QuizAnswers::default();
        answers.toggle(MultiSelectField::PrimaryGoals, "Perder peso");
        answers.toggle(MultiSelectField::PrimaryGoals, "Dormir melhor");
        assert_eq!(answers.primary_goals, vec!["Perder peso", "Dormir melhor"]);

        // Removing the first keeps the order of the rest
        answers.toggle(MultiSelectField::PrimaryGoals, "Perder peso");
        assert_eq!(answers.primary_goals, vec!["Dormir melhor"]);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let fields = [
            MultiSelectField::PrimaryGoals,
            MultiSelectField::SecondaryGoals,
            MultiSelectField::DietaryRestrictions,
            MultiSelectField::ActivityDifficulties,
        ];
        for field in fields {
            let mut answers = QuizAnswers::default();
            answers.toggle(field, "Vegano");
            assert!(answers.is_selected(field, "Vegano"));
            answers.toggle(field, "Vegano");
            let original = QuizAnswers::default();
            assert_eq!(answers, original, "double toggle should restore {field:?}");
        }
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let mut answers = QuizAnswers::default();
        answers.toggle(MultiSelectField::PrimaryGoals, "Perder peso");
        answers.set_weight_kg("70");
        answers.set_activity_level(ActivityLevel::Moderate);
        answers.set_specific_group(SpecificGroup::Office);

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["objetivos"][0], "Perder peso");
        assert_eq!(json["peso"], "70");
        assert_eq!(json["nivelAtividade"], "moderado");
        assert_eq!(json["grupoEspecifico"], "escritorio");
        assert_eq!(json["problemasColuna"], false);
    }

    #[test]
    fn answers_roundtrip() {
        let mut answers = QuizAnswers::default();
        answers.toggle(MultiSelectField::DietaryRestrictions, "Vegano");
        answers.set_age("30");
        answers.set_has_spine_issues(true);
        answers.set_activity_level(ActivityLevel::Athlete);

        let json = serde_json::to_string(&answers).unwrap();
        let parsed: QuizAnswers = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answers);
    }

    #[test]
    fn activity_level_display_matches_serde() {
        for level in ActivityLevel::ALL {
            let display = format!("{level}");
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn default_answers_are_empty() {
        let answers = QuizAnswers::default();
        assert!(answers.primary_goals.is_empty());
        assert!(answers.secondary_goals.is_empty());
        assert!(answers.weight_kg.is_empty());
        assert!(answers.activity_level.is_none());
        assert!(!answers.has_spine_issues);
        assert!(!answers.accepts_notifications);
        assert!(answers.specific_group.is_none());
    }
}
