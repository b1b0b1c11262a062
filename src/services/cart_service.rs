use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Book, CartItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(FromRow)]
struct CartWithBookRow {
    cart_id: Uuid,
    quantity: i32,
    book_id: Uuid,
    title: String,
    authors: String,
    categories: String,
    publisher: Option<String>,
    publication_date: Option<String>,
    isbn: String,
    price: i64,
    description: Option<String>,
    stock_quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let rows = sqlx::query_as::<_, CartWithBookRow>(
        r#"
        SELECT ci.id AS cart_id, ci.quantity,
               b.id AS book_id, b.title, b.authors, b.categories, b.publisher,
               b.publication_date, b.isbn, b.price, b.description, b.stock_quantity,
               b.created_at, b.updated_at
        FROM cart_items ci
        JOIN books b ON b.id = ci.book_id
        WHERE ci.user_id = $1
        ORDER BY ci.created_at DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.pool)
    .await?;

    // Totals follow the current catalog price, not any snapshot.
    let total_price: i64 = rows
        .iter()
        .map(|row| row.price * i64::from(row.quantity))
        .sum();

    let items = rows
        .into_iter()
        .map(|row| CartItemDto {
            id: row.cart_id,
            book: Book {
                id: row.book_id,
                title: row.title,
                authors: row.authors,
                categories: row.categories,
                publisher: row.publisher,
                publication_date: row.publication_date,
                isbn: row.isbn,
                price: row.price,
                description: row.description,
                stock_quantity: row.stock_quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            quantity: row.quantity,
        })
        .collect();

    Ok(ApiResponse::success(
        "OK",
        CartList { items, total_price },
        Some(Meta::empty()),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    if payload.quantity < 1 {
        let mut details = BTreeMap::new();
        details.insert("quantity".to_string(), "must be at least 1".to_string());
        return Err(AppError::Validation(details));
    }

    let book_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM books WHERE id = $1")
        .bind(payload.book_id)
        .fetch_optional(&state.pool)
        .await?;
    if book_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let existing: Option<CartItem> =
        sqlx::query_as("SELECT * FROM cart_items WHERE user_id = $1 AND book_id = $2")
            .bind(user.user_id)
            .bind(payload.book_id)
            .fetch_optional(&state.pool)
            .await?;

    // A repeat add merges into the existing row.
    let cart_item = if let Some(item) = existing {
        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = quantity + $3
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(user.user_id)
        .bind(payload.quantity)
        .fetch_one(&state.pool)
        .await?
    } else {
        sqlx::query_as(
            "INSERT INTO cart_items (id, user_id, book_id, quantity) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .bind(payload.book_id)
        .bind(payload.quantity)
        .fetch_one(&state.pool)
        .await?
    };

    Ok(ApiResponse::success("OK", cart_item, None))
}

pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let item: Option<CartItem> =
        sqlx::query_as("SELECT * FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user.user_id)
            .fetch_optional(&state.pool)
            .await?;

    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    // Zero or negative quantity empties the line instead of storing it.
    if payload.quantity <= 0 {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(item.id)
            .execute(&state.pool)
            .await?;
        return Ok(ApiResponse::message_only("Removed from cart"));
    }

    let updated: CartItem = sqlx::query_as(
        "UPDATE cart_items SET quantity = $2 WHERE id = $1 RETURNING *",
    )
    .bind(item.id)
    .bind(payload.quantity)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success("Updated", updated, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(item_id)
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::message_only("Removed from cart"))
}
