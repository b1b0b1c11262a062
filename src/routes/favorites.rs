use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::favorites::{FavoriteBookList, ToggleFavoriteResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::favorite_service,
    state::AppState,
};

// The toggle handler is mounted under /books/{id}/favorites by the books
// router; only the flat listing lives here.
pub fn router() -> Router<AppState> {
    Router::new().route("/favorites", get(list_favorites))
}

#[utoipa::path(
    post,
    path = "/api/v1/books/{id}/favorites",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = ApiResponse<ToggleFavoriteResponse>),
        (status = 404, description = "Book not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ToggleFavoriteResponse>>> {
    let resp = favorite_service::toggle_favorite(&state, &user, book_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10")
    ),
    responses(
        (status = 200, description = "Favorited books", body = ApiResponse<FavoriteBookList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FavoriteBookList>>> {
    let resp = favorite_service::list_favorites(&state, &user, pagination).await?;
    Ok(Json(resp))
}
