use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::users::{SignupRequest, UpdateMeRequest, UserList, UserStatusUpdate},
    entity::users::{
        ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Role, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    security,
    state::AppState,
};

fn validate_signup(payload: &SignupRequest) -> AppResult<()> {
    let mut details = BTreeMap::new();
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        details.insert("email".to_string(), "must be a valid email address".to_string());
    }
    if payload.password.len() < 8 {
        details.insert("password".to_string(), "must be at least 8 characters".to_string());
    }
    if payload.name.trim().is_empty() {
        details.insert("name".to_string(), "must not be empty".to_string());
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(details))
    }
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<User>> {
    validate_signup(&payload)?;

    let exists = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let password_hash = security::hash_password(&payload.password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        name: Set(payload.name),
        gender: Set(payload.gender),
        address: Set(payload.address),
        phone_number: Set(payload.phone_number),
        role: Set(Role::User),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::success("User created", user_from_entity(user), None))
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", user_from_entity(model), None))
}

pub async fn update_me(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateMeRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = existing.into();
    if let Some(password) = payload.password {
        if password.len() < 8 {
            let mut details = BTreeMap::new();
            details.insert("password".to_string(), "must be at least 8 characters".to_string());
            return Err(AppError::Validation(details));
        }
        active.password_hash = Set(security::hash_password(&password)?);
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(phone_number) = payload.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Profile updated",
        user_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_me(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Users::delete_by_id(user.user_id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %user.user_id, "account deleted");

    Ok(ApiResponse::message_only("Account deleted"))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, size, offset) = pagination.normalize();

    let finder = Users::find().order_by_desc(UserCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn update_user_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UserStatusUpdate,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = existing.into();
    active.is_active = Set(payload.is_active);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "User status updated",
        user_from_entity(updated),
        Some(Meta::empty()),
    ))
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        gender: model.gender,
        address: model.address,
        phone_number: model.phone_number,
        role: model.role,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
