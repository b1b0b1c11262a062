use axum::{extract::FromRequestParts, http::header};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    entity::users::Entity as Users,
    error::AppError,
    models::Role,
    security,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let claims = security::decode_token(&state.config.jwt_secret, token)?;
        if claims.token_type.as_deref() == Some(security::REFRESH_TOKEN_TYPE) {
            return Err(AppError::Unauthorized(
                "Refresh token is not a bearer credential".into(),
            ));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

        let user = Users::find_by_id(user_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown user".into()))?;

        // Authorization decisions use the stored role, not the token claim.
        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
