use super::*;
use base64::Engine as _;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

fn token_with(payload: &serde_json::Value, padded: bool) -> String {
    let body = serde_json::to_vec(payload).unwrap();
    let encoded = if padded { URL_SAFE.encode(body) } else { URL_SAFE_NO_PAD.encode(body) };
    format!("eyJhbGciOiJSUzI1NiJ9.{encoded}.sig")
}

#[test]
fn decodes_standard_and_custom_claims() {
    let token = token_with(
        &serde_json::json!({
            "sub": "u1",
            "email": "ana@onebot.test",
            "email_verified": true,
            "exp": 1_700_000_000u64,
            "role": "admin",
            "tenant": "acme"
        }),
        false,
    );

    let claims = decode(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("u1"));
    assert_eq!(claims.email_verified, Some(true));
    assert_eq!(claims.exp, Some(1_700_000_000));
    assert_eq!(claims.role_or_default(), "admin");
    assert_eq!(claims.extra["tenant"], "acme");
}

#[test]
fn tolerates_padding() {
    // 'a' x1 forces padding in standard base64.
    let token = token_with(&serde_json::json!({ "sub": "a" }), true);
    assert!(token.contains('='));
    assert_eq!(decode(&token).unwrap().sub.as_deref(), Some("a"));
}

#[test]
fn missing_role_defaults_to_user() {
    let token = token_with(&serde_json::json!({ "sub": "u2" }), false);
    assert_eq!(decode(&token).unwrap().role_or_default(), "user");
}

#[test]
fn malformed_tokens_decode_to_none() {
    assert_eq!(decode("not-a-jwt"), None);
    assert_eq!(decode("a.b"), None);
    assert_eq!(decode("a.b.c.d"), None);
    assert_eq!(decode("a.!!!.c"), None);
    assert_eq!(decode(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"))), None);
}
