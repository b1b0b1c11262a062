use axum_bookstore_api::{models::Role, security};
use uuid::Uuid;

const SECRET: &str = "test-secret";

#[test]
fn password_hash_verifies_round_trip() {
    let hash = security::hash_password("correct horse battery staple").expect("hash");

    assert!(security::verify_password("correct horse battery staple", &hash));
    assert!(!security::verify_password("wrong password", &hash));
}

#[test]
fn verify_rejects_malformed_hash() {
    assert!(!security::verify_password("whatever", "not-a-phc-string"));
}

#[test]
fn access_token_carries_subject_and_role() {
    let user_id = Uuid::new_v4();
    let token = security::issue_access_token(SECRET, user_id, Role::Admin, 30).expect("token");

    let claims = security::decode_token(SECRET, &token).expect("decode");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, Some(Role::Admin));
    assert_eq!(claims.token_type, None);
}

#[test]
fn refresh_token_is_typed_and_roleless() {
    let user_id = Uuid::new_v4();
    let token = security::issue_refresh_token(SECRET, user_id, 7).expect("token");

    let claims = security::decode_token(SECRET, &token).expect("decode");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.token_type.as_deref(), Some(security::REFRESH_TOKEN_TYPE));
    assert_eq!(claims.role, None);
}

#[test]
fn decode_rejects_wrong_secret() {
    let token = security::issue_access_token(SECRET, Uuid::new_v4(), Role::User, 30).expect("token");

    assert!(security::decode_token("another-secret", &token).is_err());
}

#[test]
fn decode_rejects_expired_token() {
    // Well past the default leeway.
    let token = security::issue_access_token(SECRET, Uuid::new_v4(), Role::User, -5).expect("token");

    assert!(security::decode_token(SECRET, &token).is_err());
}

#[test]
fn decode_rejects_garbage() {
    assert!(security::decode_token(SECRET, "definitely.not.a-jwt").is_err());
}
