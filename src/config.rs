//! Runtime configuration.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Connection settings for the hosted auth/profile service.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub base_url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: SecretString,
}

impl BackendConfig {
    /// Read `ROTINA_BACKEND_URL` and `ROTINA_ANON_KEY` from the environment.
    ///
    /// Returns `None` when the URL is unset so callers can fall back to the
    /// in-memory backend.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(base_url) = std::env::var("ROTINA_BACKEND_URL") else {
            return Ok(None);
        };
        if base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ROTINA_BACKEND_URL".to_string(),
                message: "URL must not be empty".to_string(),
            });
        }
        let anon_key = std::env::var("ROTINA_ANON_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ROTINA_ANON_KEY".to_string()))?;

        Ok(Some(Self {
            base_url,
            anon_key: SecretString::from(anon_key),
        }))
    }
}
