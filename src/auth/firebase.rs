//! Firebase Authentication over its REST endpoints.
//!
//! Sign-in and profile lookup go to Identity Toolkit; token refresh goes to
//! Secure Token. Both are keyed by the Firebase web API key. Pure parsing in
//! `parse_*` helpers for testability.

use super::{AuthError, Credentials, IdentityProvider, User, claims};
use crate::config::{FirebaseConfig, HttpTimeouts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Fallback lifetime when the backend omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

// =============================================================================
// CLIENT
// =============================================================================

pub struct FirebaseIdentity {
    http: reqwest::Client,
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl FirebaseIdentity {
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] when the API key is blank, or
    /// [`AuthError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &FirebaseConfig, timeouts: HttpTimeouts) -> Result<Self, AuthError> {
        Self::with_endpoints(config, timeouts, IDENTITY_TOOLKIT_URL, SECURE_TOKEN_URL)
    }

    /// Point the client at alternative endpoints (emulator or tests).
    ///
    /// # Errors
    ///
    /// Same as [`FirebaseIdentity::new`].
    pub fn with_endpoints(
        config: &FirebaseConfig,
        timeouts: HttpTimeouts,
        identity_url: &str,
        token_url: &str,
    ) -> Result<Self, AuthError> {
        if config.api_key.trim().is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            identity_url: identity_url.trim_end_matches('/').to_owned(),
            token_url: token_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn post_json<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<String, AuthError> {
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        read_body(response).await
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, AuthError> {
        let url = format!("{}/accounts:signInWithPassword", self.identity_url);
        let body = SignInRequest { email, password, return_secure_token: true };
        let text = self.post_json(&url, &body).await?;
        tracing::info!(email, "firebase sign-in succeeded");
        parse_sign_in(&text)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, AuthError> {
        let url = format!("{}/token", self.token_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let text = read_body(response).await?;
        tracing::debug!("firebase token refreshed");
        parse_refresh(&text)
    }

    async fn lookup(&self, id_token: &str) -> Result<User, AuthError> {
        let url = format!("{}/accounts:lookup", self.identity_url);
        let text = self.post_json(&url, &LookupRequest { id_token }).await?;
        parse_lookup(&text, id_token)
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, AuthError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
    if status.is_success() {
        return Ok(text);
    }
    tracing::warn!(status = status.as_u16(), "firebase request rejected");
    Err(parse_error(&text).unwrap_or_else(|| AuthError::Provider(format!("HTTP {}", status.as_u16()))))
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn lifetime(expires_in: Option<&str>) -> Duration {
    Duration::from_secs(expires_in.and_then(|s| s.trim().parse().ok()).unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
}

fn parse_sign_in(json: &str) -> Result<Credentials, AuthError> {
    let r: SignInResponse = serde_json::from_str(json).map_err(|e| AuthError::Parse(e.to_string()))?;
    Ok(Credentials::new(r.id_token, r.refresh_token, lifetime(r.expires_in.as_deref())))
}

fn parse_refresh(json: &str) -> Result<Credentials, AuthError> {
    let r: RefreshResponse = serde_json::from_str(json).map_err(|e| AuthError::Parse(e.to_string()))?;
    Ok(Credentials::new(r.id_token, r.refresh_token, lifetime(r.expires_in.as_deref())))
}

/// The role comes from the token's custom claims.
fn parse_lookup(json: &str, id_token: &str) -> Result<User, AuthError> {
    let r: LookupResponse = serde_json::from_str(json).map_err(|e| AuthError::Parse(e.to_string()))?;
    let user = r.users.into_iter().next().ok_or(AuthError::SessionExpired)?;
    let role = claims::decode(id_token)
        .map_or_else(|| super::DEFAULT_ROLE.to_owned(), |c| c.role_or_default().to_owned());
    Ok(User {
        uid: user.local_id,
        email: user.email.unwrap_or_default(),
        display_name: user.display_name.unwrap_or_default(),
        email_verified: user.email_verified,
        photo_url: user.photo_url,
        role,
    })
}

fn parse_error(json: &str) -> Option<AuthError> {
    let envelope: ErrorEnvelope = serde_json::from_str(json).ok()?;
    Some(AuthError::from_firebase_code(&envelope.error.message))
}

#[cfg(test)]
#[path = "firebase_test.rs"]
mod tests;
