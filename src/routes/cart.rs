use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartList, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart))
        .route("/{item_id}", patch(update_cart_item).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Cart with current-price total", body = ApiResponse<CartList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add or merge cart item", body = ApiResponse<CartItem>),
        (status = 404, description = "Book not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/cart/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Updated quantity; a quantity of zero or less deletes the row", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::update_cart_item(&state, &user, item_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Removed from cart", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::remove_from_cart(&state, &user, item_id).await?;
    Ok(Json(resp))
}
