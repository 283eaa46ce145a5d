//! Error types for the app core.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the external auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No signed-in user. Display text matches the toast shown before the
    /// login redirect.
    #[error("Usuário não autenticado")]
    NotAuthenticated,

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Auth request failed: {0}")]
    Http(String),

    #[error("Auth service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the profile persistence service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile request failed: {0}")]
    Http(String),

    #[error("Profile service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Local form validation errors.
///
/// Display text is the exact copy surfaced to the user, so screens can show
/// the error directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Selecione pelo menos um objetivo principal")]
    NoPrimaryGoal,

    #[error("Preencha todos os dados físicos")]
    IncompleteBodyMetrics,

    #[error("Selecione seu nível de atividade física")]
    NoActivityLevel,

    #[error("As senhas não coincidem")]
    PasswordMismatch,

    #[error("A senha deve ter no mínimo 6 caracteres")]
    PasswordTooShort,
}

/// Result type alias for the app.
pub type Result<T> = std::result::Result<T, Error>;
