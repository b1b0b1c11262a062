use axum::{
    Json, Router,
    extract::{Path, State},
    routing::patch,
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Review,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

// The create/list handlers are mounted under /books/{id}/reviews by the books
// router; only the review-id routes live here.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/reviews/{review_id}",
        patch(update_review).delete(delete_review),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/books/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ApiResponse<Review>),
        (status = 404, description = "Book not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::create_review(&state, &user, book_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reviews for the book", body = ApiResponse<ReviewList>)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_reviews(&state, book_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::update_review(&state, &user, review_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Neither author nor admin"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(review_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_review(&state, &user, review_id).await?;
    Ok(Json(resp))
}
