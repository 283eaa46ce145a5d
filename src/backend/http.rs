//! HTTP backend — talks to the hosted auth/profile service over REST.
//!
//! Account operations go through the `/auth/v1` endpoints, profile rows
//! through `/rest/v1/user_profiles`. The access token of the signed-in user
//! is held in memory only; nothing is persisted locally.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{AuthClient, Session};
use crate::avatar::AvatarAppearance;
use crate::config::BackendConfig;
use crate::error::{AuthError, ProfileError};
use crate::profile::{ProfileRecord, ProfileStore};
use crate::quiz::QuizAnswers;

use async_trait::async_trait;

/// Client for the hosted backend.
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
    /// Access token of the signed-in user, when any.
    token: RwLock<Option<SecretString>>,
}

/// User object returned by the auth endpoints.
#[derive(Debug, Deserialize)]
struct ApiUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl ApiUser {
    fn into_session(self, access_token: SecretString) -> Session {
        let display_name = self
            .user_metadata
            .get("nome")
            .and_then(|v| v.as_str())
            .map(String::from);
        Session {
            user_id: self.id,
            email: self.email.unwrap_or_default(),
            display_name,
            access_token,
        }
    }
}

/// Response of the signup and password-grant endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ApiUser,
}

/// Pull a human-readable message out of an error response body.
async fn api_error(response: reqwest::Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .into_iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or(body);
    (status, message)
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            token: RwLock::new(None),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url.trim_end_matches('/'))
    }

    /// Token sent on data requests: the user's when signed in, the anon key
    /// otherwise.
    async fn bearer(&self) -> SecretString {
        match self.token.read().await.clone() {
            Some(token) => token,
            None => self.config.anon_key.clone(),
        }
    }

    async fn store_token(&self, body: TokenResponse) -> Session {
        let token = SecretString::from(body.access_token);
        *self.token.write().await = Some(token.clone());
        body.user.into_session(token)
    }
}

#[async_trait]
impl AuthClient for HttpBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "nome": display_name },
            }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(AuthError::Api { status, message });
        }
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        Ok(self.store_token(body).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(AuthError::InvalidCredentials);
        }
        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(AuthError::Api { status, message });
        }
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        Ok(self.store_token(body).await)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.auth_url("recover"))
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(AuthError::Api { status, message });
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(token) = self.token.read().await.clone() else {
            return Ok(None);
        };
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Token expired or revoked
            *self.token.write().await = None;
            return Ok(None);
        }
        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(AuthError::Api { status, message });
        }
        let user: ApiUser = response
            .json()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        Ok(Some(user.into_session(token)))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.token.write().await.take();
        if let Some(token) = token {
            let result = self
                .client
                .post(self.auth_url("logout"))
                .header("apikey", self.config.anon_key.expose_secret())
                .bearer_auth(token.expose_secret())
                .send()
                .await;
            // The local session is gone either way
            if let Err(e) = result {
                tracing::debug!("Logout request failed: {e}");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for HttpBackend {
    async fn upsert_quiz_answers(
        &self,
        user_id: Uuid,
        answers: &QuizAnswers,
    ) -> Result<(), ProfileError> {
        let response = self
            .client
            .post(self.rest_url("user_profiles"))
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(self.bearer().await.expose_secret())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&serde_json::json!({
                "user_id": user_id,
                "quiz_data": answers,
                "completed_quiz": true,
                "updated_at": Utc::now(),
            }))
            .send()
            .await
            .map_err(|e| ProfileError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(ProfileError::Api { status, message });
        }
        Ok(())
    }

    async fn update_avatar(
        &self,
        user_id: Uuid,
        appearance: &AvatarAppearance,
    ) -> Result<(), ProfileError> {
        let response = self
            .client
            .patch(self.rest_url("user_profiles"))
            .query(&[("user_id", format!("eq.{user_id}"))])
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(self.bearer().await.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({
                "avatar_data": appearance,
                "updated_at": Utc::now(),
            }))
            .send()
            .await
            .map_err(|e| ProfileError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(ProfileError::Api { status, message });
        }
        Ok(())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, ProfileError> {
        let response = self
            .client
            .get(self.rest_url("user_profiles"))
            .query(&[("user_id", format!("eq.{user_id}")), ("select", "*".to_string())])
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(self.bearer().await.expose_secret())
            .send()
            .await
            .map_err(|e| ProfileError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = api_error(response).await;
            return Err(ProfileError::Api { status, message });
        }
        let rows: Vec<ProfileRecord> = response
            .json()
            .await
            .map_err(|e| ProfileError::Http(e.to_string()))?;
        Ok(rows.into_iter().next())
    }
}
