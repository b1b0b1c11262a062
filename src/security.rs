use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Role,
};

pub const REFRESH_TOKEN_TYPE: &str = "refresh";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn issue_access_token(
    secret: &str,
    user_id: Uuid,
    role: Role,
    ttl_minutes: i64,
) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        role: Some(role),
        token_type: None,
        exp: expiry(Duration::minutes(ttl_minutes))?,
    };
    sign(secret, &claims)
}

/// Refresh tokens carry no role claim; the role is re-read on refresh.
pub fn issue_refresh_token(secret: &str, user_id: Uuid, ttl_days: i64) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        role: None,
        token_type: Some(REFRESH_TOKEN_TYPE.to_string()),
        exp: expiry(Duration::days(ttl_days))?,
    };
    sign(secret, &claims)
}

pub fn decode_token(secret: &str, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

fn expiry(ttl: Duration) -> AppResult<usize> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
    Ok(expiration.timestamp() as usize)
}

fn sign(secret: &str, claims: &Claims) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
