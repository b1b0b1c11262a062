use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::users::{SignupRequest, UpdateMeRequest, UserList, UserStatusUpdate},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    routes::params::Pagination,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/me", get(me).patch(update_me).delete(delete_me))
        .route("/", get(list_users))
        .route("/{id}/status", patch(update_user_status))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Users"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::signup(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<User>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateMeRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_me(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "List users (admin only)", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/status",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserStatusUpdate,
    responses(
        (status = 200, description = "Status updated (admin only)", body = ApiResponse<User>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserStatusUpdate>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
