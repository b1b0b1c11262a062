use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::books::{BookList, CreateBookRequest, UpdateBookRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Book,
    response::ApiResponse,
    routes::{favorites, params::BookQuery, reviews},
    services::book_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_book).get(list_books))
        .route(
            "/{id}",
            get(get_book).patch(update_book).delete(delete_book),
        )
        .route(
            "/{id}/reviews",
            post(reviews::create_review).get(reviews::list_reviews),
        )
        .route("/{id}/favorites", post(favorites::toggle_favorite))
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
        ("keyword" = Option<String>, Query, description = "Substring match on title or authors"),
        ("category" = Option<String>, Query, description = "Substring match on categories"),
        ("sort" = Option<String>, Query, description = "field,direction over price, title, created_at or id"),
    ),
    responses(
        (status = 200, description = "List books", body = ApiResponse<BookList>)
    ),
    tag = "Books"
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<ApiResponse<BookList>>> {
    let resp = book_service::list_books(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Get book", body = ApiResponse<Book>),
        (status = 404, description = "Book not found"),
    ),
    tag = "Books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let resp = book_service::get_book(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = CreateBookRequest,
    responses(
        (status = 200, description = "Create book (admin only)", body = ApiResponse<Book>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Duplicate ISBN"),
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBookRequest>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let resp = book_service::create_book(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Updated book (admin only)", body = ApiResponse<Book>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn update_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookRequest>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let resp = book_service::update_book(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Deleted book (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = book_service::delete_book(&state, &user, id).await?;
    Ok(Json(resp))
}
