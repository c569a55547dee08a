use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// MOCK PROVIDER
// =============================================================================

struct MockProvider {
    lifetime: Duration,
    refreshes: AtomicUsize,
    revoke_refresh: bool,
}

impl MockProvider {
    fn new(lifetime: Duration) -> Self {
        Self { lifetime, refreshes: AtomicUsize::new(0), revoke_refresh: false }
    }

    fn revoking() -> Self {
        Self { revoke_refresh: true, ..Self::new(Duration::from_secs(3600)) }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, AuthError> {
        if password != "secret" {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Credentials::new(format!("id-{email}-0"), "rt".into(), self.lifetime))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, AuthError> {
        if self.revoke_refresh || refresh_token != "rt" {
            return Err(AuthError::SessionExpired);
        }
        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Credentials::new(format!("id-refreshed-{n}"), "rt".into(), self.lifetime))
    }

    async fn lookup(&self, _id_token: &str) -> Result<User, AuthError> {
        Ok(User {
            uid: "u1".into(),
            email: "ana@onebot.test".into(),
            display_name: "Ana".into(),
            email_verified: true,
            photo_url: None,
            role: "admin".into(),
        })
    }
}

fn session(provider: MockProvider) -> (Session, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (Session::new(provider.clone(), Duration::from_secs(300)), provider)
}

// =============================================================================
// STATE
// =============================================================================

#[tokio::test]
async fn starts_initializing_then_signed_out_without_token() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    assert_eq!(session.state(), AuthState::Initializing);

    assert_eq!(session.restore(None).await.unwrap(), None);
    assert_eq!(session.state(), AuthState::SignedOut);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn restore_with_refresh_token_signs_in() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    let user = session.restore(Some("rt")).await.unwrap().unwrap();
    assert_eq!(user.uid, "u1");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn restore_with_revoked_token_signs_out() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    let err = session.restore(Some("stale")).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
    assert_eq!(session.state(), AuthState::SignedOut);
}

#[tokio::test]
async fn sign_in_publishes_user_to_subscribers() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    let mut rx = session.subscribe();

    session.sign_in("ana@onebot.test", "secret").await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().user().map(|u| u.role.as_str()), Some("admin"));
    assert_eq!(session.current_user().unwrap().email, "ana@onebot.test");
}

#[tokio::test]
async fn failed_sign_in_without_session_stays_unauthenticated() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    session.restore(None).await.unwrap();

    let err = session.sign_in("ana@onebot.test", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(session.state(), AuthState::SignedOut);
    assert_eq!(session.id_token(false).await.unwrap(), None);
}

#[tokio::test]
async fn failed_sign_in_keeps_existing_session() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    let user = session.sign_in("ana@onebot.test", "secret").await.unwrap();

    let err = session.sign_in("ana@onebot.test", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(session.is_authenticated());
    assert_eq!(session.current_user(), Some(user));
    assert_eq!(session.id_token(false).await.unwrap().as_deref(), Some("id-ana@onebot.test-0"));
    assert_eq!(session.refresh_token().await.as_deref(), Some("rt"));
}

#[tokio::test]
async fn sign_out_clears_credentials() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    session.sign_in("ana@onebot.test", "secret").await.unwrap();
    assert_eq!(session.refresh_token().await.as_deref(), Some("rt"));

    session.sign_out().await;
    assert_eq!(session.current_user(), None);
    assert_eq!(session.refresh_token().await, None);
}

// =============================================================================
// TOKENS
// =============================================================================

#[tokio::test]
async fn fresh_token_is_reused() {
    let (session, provider) = session(MockProvider::new(Duration::from_secs(3600)));
    session.sign_in("ana@onebot.test", "secret").await.unwrap();

    let token = session.id_token(false).await.unwrap().unwrap();
    assert_eq!(token, "id-ana@onebot.test-0");
    assert_eq!(provider.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn token_near_expiry_is_refreshed() {
    let (session, provider) = session(MockProvider::new(Duration::from_secs(60)));
    session.sign_in("ana@onebot.test", "secret").await.unwrap();

    let token = session.id_token(false).await.unwrap().unwrap();
    assert_eq!(token, "id-refreshed-1");
    assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn force_refresh_always_refreshes() {
    let (session, provider) = session(MockProvider::new(Duration::from_secs(3600)));
    session.sign_in("ana@onebot.test", "secret").await.unwrap();

    session.id_token(true).await.unwrap();
    session.id_token(true).await.unwrap();
    assert_eq!(provider.refreshes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn revoked_refresh_signs_out() {
    let (session, _) = session(MockProvider::revoking());
    session.sign_in("ana@onebot.test", "secret").await.unwrap();

    let err = session.id_token(true).await.unwrap_err();
    assert!(err.ends_session());
    assert_eq!(session.state(), AuthState::SignedOut);
}

#[tokio::test]
async fn session_is_a_token_source() {
    let (session, _) = session(MockProvider::new(Duration::from_secs(3600)));
    let source: &dyn TokenSource = &session;
    assert_eq!(source.bearer_token().await.unwrap(), None);

    session.sign_in("ana@onebot.test", "secret").await.unwrap();
    assert_eq!(source.bearer_token().await.unwrap().as_deref(), Some("id-ana@onebot.test-0"));
}
