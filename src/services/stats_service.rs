use crate::{
    dto::stats::{DailySales, DailySalesList, TopSeller, TopSellerList},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const DEFAULT_TOP_SELLERS_LIMIT: i64 = 5;

pub async fn daily_sales(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DailySalesList>> {
    ensure_admin(user)?;

    // SUM(bigint) is NUMERIC in Postgres, hence the cast back.
    let items: Vec<DailySales> = sqlx::query_as(
        r#"
        SELECT created_at::date AS date,
               COALESCE(SUM(total_price), 0)::BIGINT AS total_sales,
               COUNT(id) AS order_count
        FROM orders
        GROUP BY created_at::date
        ORDER BY date
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Daily sales",
        DailySalesList { items },
        Some(Meta::empty()),
    ))
}

pub async fn top_sellers(
    state: &AppState,
    user: &AuthUser,
    limit: Option<i64>,
) -> AppResult<ApiResponse<TopSellerList>> {
    ensure_admin(user)?;
    let limit = limit.unwrap_or(DEFAULT_TOP_SELLERS_LIMIT).max(1);

    let items: Vec<TopSeller> = sqlx::query_as(
        r#"
        SELECT b.id AS book_id, b.title,
               COALESCE(SUM(oi.quantity), 0)::BIGINT AS total_sold
        FROM order_items oi
        JOIN books b ON b.id = oi.book_id
        GROUP BY b.id, b.title
        ORDER BY total_sold DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Top sellers",
        TopSellerList { items },
        Some(Meta::empty()),
    ))
}
