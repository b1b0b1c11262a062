use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, UpdateOrderStatusRequest},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::order_service::order_from_entity,
    state::AppState,
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, size, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let mut finder = Orders::find().filter(condition);

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Fulfillment rank along CREATED -> PAID -> SHIPPED -> DELIVERED.
/// CANCELED has no rank; it is reachable only through the owner cancel.
fn fulfillment_rank(status: OrderStatus) -> Option<u8> {
    match status {
        OrderStatus::Created => Some(0),
        OrderStatus::Paid => Some(1),
        OrderStatus::Shipped => Some(2),
        OrderStatus::Delivered => Some(3),
        OrderStatus::Canceled => None,
    }
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;

    let existing = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let (Some(current), Some(target)) = (
        fulfillment_rank(existing.status),
        fulfillment_rank(payload.status),
    ) else {
        return Err(AppError::BadRequest("Invalid status transition".into()));
    };
    if target <= current {
        return Err(AppError::BadRequest("Invalid status transition".into()));
    }

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, status = ?order.status, "order status updated");

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}
