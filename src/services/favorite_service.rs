use uuid::Uuid;

use crate::{
    dto::favorites::{FavoriteBookList, ToggleFavoriteResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Book, Favorite},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Flips the favorite state for (user, book). The unique constraint on the
/// pair is the only guard against a concurrent double-toggle.
pub async fn toggle_favorite(
    state: &AppState,
    user: &AuthUser,
    book_id: Uuid,
) -> AppResult<ApiResponse<ToggleFavoriteResponse>> {
    let book_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM books WHERE id = $1")
        .bind(book_id)
        .fetch_optional(&state.pool)
        .await?;
    if book_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let existing: Option<Favorite> =
        sqlx::query_as("SELECT * FROM favorites WHERE user_id = $1 AND book_id = $2")
            .bind(user.user_id)
            .bind(book_id)
            .fetch_optional(&state.pool)
            .await?;

    if let Some(favorite) = existing {
        sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(favorite.id)
            .execute(&state.pool)
            .await?;

        return Ok(ApiResponse::success(
            "Removed from favorites",
            ToggleFavoriteResponse { liked: false },
            Some(Meta::empty()),
        ));
    }

    sqlx::query("INSERT INTO favorites (id, user_id, book_id) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .bind(book_id)
        .execute(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Added to favorites",
        ToggleFavoriteResponse { liked: true },
        Some(Meta::empty()),
    ))
}

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<FavoriteBookList>> {
    let (page, size, offset) = pagination.normalize();
    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT b.*
        FROM favorites f
        JOIN books b ON b.id = f.book_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(size)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, size, total.0);
    Ok(ApiResponse::success(
        "OK",
        FavoriteBookList { items: books },
        Some(meta),
    ))
}
