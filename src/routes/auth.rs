use axum::{Form, Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{LoginForm, RefreshRequest, TokenPair},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let resp = auth_service::login(&state, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let resp = auth_service::refresh(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(_user: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(auth_service::logout())
}
