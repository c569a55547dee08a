//! Route guard: decides whether a protected route may open.

use super::AuthState;
use tokio::sync::watch;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_RETURN_URL: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth state not known yet; ask again once it settles.
    Pending,
    Allow,
    /// Send the user to this location instead.
    Redirect(String),
}

/// Decide access to `target_url` for the given state.
#[must_use]
pub fn guard(state: &AuthState, target_url: &str) -> GuardDecision {
    match state {
        AuthState::Initializing => GuardDecision::Pending,
        AuthState::SignedIn(user) => {
            tracing::debug!(uid = %user.uid, target_url, "route allowed");
            GuardDecision::Allow
        }
        AuthState::SignedOut => {
            tracing::debug!(target_url, "route requires sign-in");
            GuardDecision::Redirect(login_redirect(target_url))
        }
    }
}

/// Wait for the first settled state, then decide. A closed channel counts
/// as signed out.
pub async fn resolve(rx: &mut watch::Receiver<AuthState>, target_url: &str) -> GuardDecision {
    match rx.wait_for(|s| !matches!(s, AuthState::Initializing)).await {
        Ok(state) => guard(&state, target_url),
        Err(_) => guard(&AuthState::SignedOut, target_url),
    }
}

/// `/login?returnUrl=<target>` with the target percent-encoded.
#[must_use]
pub fn login_redirect(target_url: &str) -> String {
    format!("{LOGIN_PATH}?returnUrl={}", urlencoding::encode(target_url))
}

/// Where to go after login. Only same-origin absolute paths are honored;
/// anything else lands on the dashboard.
#[must_use]
pub fn return_url(param: Option<&str>) -> String {
    match param.map(str::trim) {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") => url.to_owned(),
        _ => DEFAULT_RETURN_URL.to_owned(),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
