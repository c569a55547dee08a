use super::*;

#[test]
fn firebase_codes_map_to_messages() {
    assert!(matches!(AuthError::from_firebase_code("INVALID_LOGIN_CREDENTIALS"), AuthError::InvalidCredentials));
    assert!(matches!(AuthError::from_firebase_code("EMAIL_NOT_FOUND"), AuthError::EmailNotFound));
    assert!(matches!(AuthError::from_firebase_code("INVALID_PASSWORD"), AuthError::WrongPassword));
    assert!(matches!(AuthError::from_firebase_code("USER_DISABLED"), AuthError::UserDisabled));
    assert!(matches!(AuthError::from_firebase_code("INVALID_EMAIL"), AuthError::InvalidEmail));
    assert!(matches!(AuthError::from_firebase_code("OPERATION_NOT_ALLOWED"), AuthError::OperationNotAllowed));
    assert_eq!(
        AuthError::InvalidCredentials.to_string(),
        "Credenciales inválidas. Verifica tu email y contraseña."
    );
}

#[test]
fn firebase_code_detail_suffix_is_ignored() {
    let err = AuthError::from_firebase_code(
        "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled.",
    );
    assert!(matches!(err, AuthError::TooManyAttempts));
    assert_eq!(err.to_string(), "Demasiados intentos fallidos. Intenta más tarde.");
}

#[test]
fn unknown_codes_keep_the_code() {
    let err = AuthError::from_firebase_code("QUOTA_EXCEEDED");
    assert_eq!(err.to_string(), "Error de autenticación: QUOTA_EXCEEDED");
    assert!(!err.ends_session());
}

#[test]
fn revoked_tokens_end_the_session() {
    for code in ["TOKEN_EXPIRED", "INVALID_REFRESH_TOKEN", "USER_NOT_FOUND"] {
        assert!(AuthError::from_firebase_code(code).ends_session(), "{code}");
    }
}

#[test]
fn credentials_expiry_window() {
    let creds = Credentials::new("id".into(), "refresh".into(), Duration::from_secs(60));
    assert!(creds.expires_within(Duration::from_secs(300)));
    assert!(!creds.expires_within(Duration::from_secs(10)));
}

#[test]
fn user_serializes_camel_case() {
    let user = User {
        uid: "u1".into(),
        email: "ana@onebot.test".into(),
        display_name: "Ana".into(),
        email_verified: true,
        photo_url: None,
        role: DEFAULT_ROLE.into(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["displayName"], "Ana");
    assert_eq!(json["emailVerified"], true);
    assert!(json.get("photoUrl").is_none());
}
