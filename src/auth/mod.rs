//! Identity: who is signed in, their ID token, and which routes they may open.
//!
//! DESIGN
//! ======
//! [`IdentityProvider`] is the seam over the identity backend. Production uses
//! [`FirebaseIdentity`] (Firebase Auth REST); tests use an in-memory mock.
//! [`Session`] owns the credentials and publishes [`AuthState`] on a watch
//! channel, so observers always see the latest state and never a backlog.
//! The session is the API client's [`crate::api::TokenSource`].

pub mod claims;
pub mod firebase;
pub mod guard;
pub mod session;

pub use claims::Claims;
pub use firebase::FirebaseIdentity;
pub use guard::{GuardDecision, guard, return_url};
pub use session::{AuthState, Session};

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_ROLE: &str = "user";

// =============================================================================
// TYPES
// =============================================================================

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Custom claim `role`, `user` when absent.
    pub role: String,
}

/// Tokens issued by the identity backend.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: Instant,
}

impl Credentials {
    #[must_use]
    pub fn new(id_token: String, refresh_token: String, expires_in: Duration) -> Self {
        Self { id_token, refresh_token, expires_at: Instant::now() + expires_in }
    }

    /// True when the ID token expires within `window` from now.
    #[must_use]
    pub fn expires_within(&self, window: Duration) -> bool {
        self.expires_at <= Instant::now() + window
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Authentication failures. Display strings are shown to the admin as-is.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Credenciales inválidas. Verifica tu email y contraseña.")]
    InvalidCredentials,

    #[error("Esta cuenta ha sido deshabilitada.")]
    UserDisabled,

    #[error("No existe una cuenta con este email.")]
    EmailNotFound,

    #[error("Contraseña incorrecta.")]
    WrongPassword,

    #[error("Demasiados intentos fallidos. Intenta más tarde.")]
    TooManyAttempts,

    #[error("El formato del email es inválido.")]
    InvalidEmail,

    #[error("Operación no permitida.")]
    OperationNotAllowed,

    /// The refresh token was revoked or expired; sign in again.
    #[error("Esta operación requiere una autenticación reciente.")]
    SessionExpired,

    #[error("Error de conexión. Verifica tu internet.")]
    Network(String),

    /// No Firebase web API key is configured.
    #[error("Firebase no está configurado (FIREBASE_API_KEY).")]
    NotConfigured,

    /// Unrecognized error code from the identity backend.
    #[error("Error de autenticación: {0}")]
    Provider(String),

    /// The identity backend answered with an unreadable payload.
    #[error("Error de autenticación: respuesta inválida ({0})")]
    Parse(String),
}

impl AuthError {
    /// Map a Firebase Auth REST error code. Codes may carry a
    /// `" : detail"` suffix, which is ignored.
    #[must_use]
    pub fn from_firebase_code(raw: &str) -> Self {
        let code = raw.split(" : ").next().unwrap_or(raw).trim();
        match code {
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => Self::InvalidCredentials,
            "USER_DISABLED" => Self::UserDisabled,
            "EMAIL_NOT_FOUND" => Self::EmailNotFound,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => Self::OperationNotAllowed,
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
                Self::SessionExpired
            }
            other => Self::Provider(other.to_owned()),
        }
    }

    /// Whether the stored session is no longer usable after this error.
    #[must_use]
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::UserDisabled)
    }
}

// =============================================================================
// PROVIDER SEAM
// =============================================================================

/// Identity backend operations used by [`Session`].
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email and password for credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, AuthError>;

    /// Exchange a refresh token for fresh credentials.
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, AuthError>;

    /// Resolve the profile behind an ID token.
    async fn lookup(&self, id_token: &str) -> Result<User, AuthError>;
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
