use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::auth::{LoginForm, RefreshRequest, TokenPair},
    entity::users::{Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    security,
    state::AppState,
};

pub async fn login(state: &AppState, form: LoginForm) -> AppResult<ApiResponse<TokenPair>> {
    let user = Users::find()
        .filter(UserCol::Email.eq(form.username.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    if !security::verify_password(&form.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let access_token = security::issue_access_token(
        &state.config.jwt_secret,
        user.id,
        user.role,
        state.config.access_token_expire_minutes,
    )?;
    let refresh_token = security::issue_refresh_token(
        &state.config.jwt_secret,
        user.id,
        state.config.refresh_token_expire_days,
    )?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn refresh(
    state: &AppState,
    payload: RefreshRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let claims = security::decode_token(&state.config.jwt_secret, &payload.refresh_token)?;
    if claims.token_type.as_deref() != Some(security::REFRESH_TOKEN_TYPE) {
        return Err(AppError::Unauthorized("Invalid token type".into()));
    }

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    // The new access token carries the role as stored now, not as issued then.
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".into()))?;

    let access_token = security::issue_access_token(
        &state.config.jwt_secret,
        user.id,
        user.role,
        state.config.access_token_expire_minutes,
    )?;

    // No rotation: the refresh token goes back unchanged.
    Ok(ApiResponse::success(
        "Token refreshed",
        TokenPair {
            access_token,
            refresh_token: payload.refresh_token,
            token_type: "bearer".to_string(),
        },
        Some(Meta::empty()),
    ))
}

/// Stateless logout: nothing to revoke server side, the client drops its copy.
pub fn logout() -> ApiResponse<serde_json::Value> {
    ApiResponse::message_only("Logged out, discard tokens on the client")
}
