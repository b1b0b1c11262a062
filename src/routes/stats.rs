use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::stats::{DailySalesList, TopSellerList, TopSellersQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::stats_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(daily_sales))
        .route("/top-sellers", get(top_sellers))
}

#[utoipa::path(
    get,
    path = "/api/v1/stats/daily",
    responses(
        (status = 200, description = "Revenue and order count per day (admin only)", body = ApiResponse<DailySalesList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn daily_sales(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DailySalesList>>> {
    let resp = stats_service::daily_sales(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/stats/top-sellers",
    params(
        ("limit" = Option<i64>, Query, description = "Number of books, default 5")
    ),
    responses(
        (status = 200, description = "Best-selling books by quantity (admin only)", body = ApiResponse<TopSellerList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn top_sellers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TopSellersQuery>,
) -> AppResult<Json<ApiResponse<TopSellerList>>> {
    let resp = stats_service::top_sellers(&state, &user, query.limit).await?;
    Ok(Json(resp))
}
