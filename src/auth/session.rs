//! Signed-in session: credentials plus the observable [`AuthState`].

use super::{AuthError, Credentials, IdentityProvider, User};
use crate::api::{ApiError, TokenSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};

/// Authentication state as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No definitive answer yet (session not restored).
    Initializing,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

pub struct Session {
    provider: Arc<dyn IdentityProvider>,
    refresh_threshold: Duration,
    credentials: Mutex<Option<Credentials>>,
    state: watch::Sender<AuthState>,
}

impl Session {
    /// A session in [`AuthState::Initializing`].
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, refresh_threshold: Duration) -> Self {
        let (state, _rx) = watch::channel(AuthState::Initializing);
        Self { provider, refresh_threshold, credentials: Mutex::new(None), state }
    }

    /// Resolve the initial state from a persisted refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns the provider error when the token cannot be exchanged; the
    /// session is then signed out.
    pub async fn restore(&self, refresh_token: Option<&str>) -> Result<Option<User>, AuthError> {
        let Some(refresh_token) = refresh_token else {
            self.state.send_replace(AuthState::SignedOut);
            return Ok(None);
        };

        let outcome = async {
            let creds = self.provider.refresh(refresh_token).await?;
            let user = self.provider.lookup(&creds.id_token).await?;
            Ok::<_, AuthError>((creds, user))
        }
        .await;

        match outcome {
            Ok((creds, user)) => {
                self.establish(creds, user.clone()).await;
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed");
                self.clear().await;
                Err(e)
            }
        }
    }

    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]. A failed attempt leaves the
    /// current state and credentials untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let result = async {
            let creds = self.provider.sign_in(email, password).await?;
            let user = self.provider.lookup(&creds.id_token).await?;
            Ok::<_, AuthError>((creds, user))
        }
        .await;

        match result {
            Ok((creds, user)) => {
                tracing::info!(uid = %user.uid, role = %user.role, "signed in");
                self.establish(creds, user.clone()).await;
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(email, error = %e, "sign-in failed");
                Err(e)
            }
        }
    }

    pub async fn sign_out(&self) {
        self.clear().await;
        tracing::info!("signed out");
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), AuthState::SignedIn(_))
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Current refresh token, for persisting the session.
    pub async fn refresh_token(&self) -> Option<String> {
        self.credentials.lock().await.as_ref().map(|c| c.refresh_token.clone())
    }

    /// Current ID token, refreshed first when `force_refresh` is set or it
    /// expires within the refresh threshold. `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns the provider error if a needed refresh fails. Errors that
    /// revoke the session also sign it out.
    pub async fn id_token(&self, force_refresh: bool) -> Result<Option<String>, AuthError> {
        let mut guard = self.credentials.lock().await;
        let Some(creds) = guard.as_ref() else {
            return Ok(None);
        };

        if !force_refresh && !creds.expires_within(self.refresh_threshold) {
            return Ok(Some(creds.id_token.clone()));
        }

        let refresh_token = creds.refresh_token.clone();
        match self.provider.refresh(&refresh_token).await {
            Ok(fresh) => {
                tracing::debug!(forced = force_refresh, "id token refreshed");
                let token = fresh.id_token.clone();
                *guard = Some(fresh);
                Ok(Some(token))
            }
            Err(e) => {
                tracing::warn!(error = %e, "id token refresh failed");
                if e.ends_session() {
                    *guard = None;
                    self.state.send_replace(AuthState::SignedOut);
                }
                Err(e)
            }
        }
    }

    async fn establish(&self, creds: Credentials, user: User) {
        *self.credentials.lock().await = Some(creds);
        self.state.send_replace(AuthState::SignedIn(user));
    }

    async fn clear(&self) {
        *self.credentials.lock().await = None;
        self.state.send_replace(AuthState::SignedOut);
    }
}

#[async_trait::async_trait]
impl TokenSource for Session {
    async fn bearer_token(&self) -> Result<Option<String>, ApiError> {
        self.id_token(false).await.map_err(|e| ApiError::Token(e.to_string()))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
