use super::*;
use axum::Router;
use axum::body::Bytes;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use serde_json::json;

fn id_token_with_role(role: &str) -> String {
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json!({ "sub": "u1", "role": role }).to_string());
    format!("hdr.{payload}.sig")
}

fn firebase_config(key: &str) -> FirebaseConfig {
    FirebaseConfig { api_key: key.to_owned(), ..FirebaseConfig::default() }
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn parse_sign_in_reads_tokens_and_lifetime() {
    let creds = parse_sign_in(r#"{"idToken":"id","refreshToken":"rt","expiresIn":"120","localId":"u1"}"#).unwrap();
    assert_eq!(creds.id_token, "id");
    assert_eq!(creds.refresh_token, "rt");
    assert!(creds.expires_within(Duration::from_secs(121)));
    assert!(!creds.expires_within(Duration::from_secs(100)));
}

#[test]
fn parse_refresh_uses_snake_case_fields() {
    let creds = parse_refresh(r#"{"id_token":"id2","refresh_token":"rt2","expires_in":"3600","user_id":"u1"}"#).unwrap();
    assert_eq!(creds.id_token, "id2");
    assert_eq!(creds.refresh_token, "rt2");
}

#[test]
fn missing_lifetime_defaults_to_an_hour() {
    assert_eq!(lifetime(None), Duration::from_secs(3600));
    assert_eq!(lifetime(Some("soon")), Duration::from_secs(3600));
}

#[test]
fn parse_lookup_takes_role_from_token() {
    let json = r#"{"users":[{"localId":"u1","email":"ana@onebot.test","displayName":"Ana","emailVerified":true}]}"#;
    let user = parse_lookup(json, &id_token_with_role("admin")).unwrap();
    assert_eq!(user.uid, "u1");
    assert_eq!(user.display_name, "Ana");
    assert_eq!(user.role, "admin");
    assert_eq!(user.photo_url, None);
}

#[test]
fn parse_lookup_without_users_expires_session() {
    let err = parse_lookup(r#"{"users":[]}"#, "x.y.z").unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
}

#[test]
fn parse_error_reads_firebase_envelope() {
    let err = parse_error(r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#).unwrap();
    assert!(matches!(err, AuthError::EmailNotFound));
    assert!(parse_error("<html>").is_none());
}

#[test]
fn blank_api_key_is_not_configured() {
    let err = FirebaseIdentity::new(&firebase_config("  "), HttpTimeouts::default()).err().unwrap();
    assert!(matches!(err, AuthError::NotConfigured));
}

// =============================================================================
// FAKE FIREBASE
// =============================================================================

async fn fake_firebase(uri: Uri, body: Bytes) -> Response {
    if uri.query() != Some("key=test-key") {
        return (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": { "message": "API_KEY_INVALID" } }))).into_response();
    }
    let text = String::from_utf8_lossy(&body).into_owned();
    match uri.path() {
        "/identity/accounts:signInWithPassword" => {
            let req: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
            if req["password"] == "secret" && req["returnSecureToken"] == true {
                axum::Json(json!({
                    "idToken": id_token_with_role("admin"),
                    "refreshToken": "rt-1",
                    "expiresIn": "3600",
                    "localId": "u1"
                }))
                .into_response()
            } else {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": { "message": "INVALID_LOGIN_CREDENTIALS" } })))
                    .into_response()
            }
        }
        "/identity/accounts:lookup" => axum::Json(json!({
            "users": [{ "localId": "u1", "email": "ana@onebot.test", "displayName": "Ana", "emailVerified": true }]
        }))
        .into_response(),
        "/securetoken/token" if text.contains("grant_type=refresh_token") && text.contains("refresh_token=rt-1") => {
            axum::Json(json!({ "id_token": "id-2", "refresh_token": "rt-2", "expires_in": "3600" })).into_response()
        }
        "/securetoken/token" => {
            (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": { "message": "INVALID_REFRESH_TOKEN" } })))
                .into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_firebase() -> FirebaseIdentity {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(fake_firebase)).await.unwrap();
    });
    FirebaseIdentity::with_endpoints(
        &firebase_config("test-key"),
        HttpTimeouts::default(),
        &format!("http://{addr}/identity"),
        &format!("http://{addr}/securetoken/"),
    )
    .unwrap()
}

#[tokio::test]
async fn sign_in_then_lookup() {
    let firebase = spawn_firebase().await;

    let creds = firebase.sign_in("ana@onebot.test", "secret").await.unwrap();
    assert_eq!(creds.refresh_token, "rt-1");

    let user = firebase.lookup(&creds.id_token).await.unwrap();
    assert_eq!(user.email, "ana@onebot.test");
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn wrong_password_maps_to_invalid_credentials() {
    let firebase = spawn_firebase().await;
    let err = firebase.sign_in("ana@onebot.test", "nope").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn refresh_exchanges_tokens() {
    let firebase = spawn_firebase().await;

    let creds = firebase.refresh("rt-1").await.unwrap();
    assert_eq!(creds.id_token, "id-2");

    let err = firebase.refresh("revoked").await.unwrap_err();
    assert!(err.ends_session());
}
