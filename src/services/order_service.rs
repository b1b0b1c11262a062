use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, OrderWithItems, PlaceOrderRequest},
    entity::{
        books::Entity as Books,
        cart_items::{Column as CartCol, Entity as CartItems},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

fn validate_place_order(payload: &PlaceOrderRequest) -> AppResult<()> {
    let mut details = BTreeMap::new();
    if payload.recipient_name.trim().is_empty() {
        details.insert("recipient_name".to_string(), "must not be empty".to_string());
    }
    if payload.recipient_phone.trim().is_empty() {
        details.insert("recipient_phone".to_string(), "must not be empty".to_string());
    }
    if payload.shipping_address.trim().is_empty() {
        details.insert("shipping_address".to_string(), "must not be empty".to_string());
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(details))
    }
}

/// Turns the cart into an order: snapshot prices, write the order and its
/// items, clear the cart. All of it commits as one transaction or none of it
/// is observable.
pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    validate_place_order(&payload)?;

    let txn = state.orm.begin().await?;

    let cart_rows = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    if cart_rows.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let mut lines: Vec<(Uuid, i32, i64)> = Vec::with_capacity(cart_rows.len());
    let mut total_price: i64 = 0;
    for row in &cart_rows {
        let book = Books::find_by_id(row.book_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        total_price += book.price * i64::from(row.quantity);
        lines.push((book.id, row.quantity, book.price));
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        total_price: Set(total_price),
        status: Set(OrderStatus::Created),
        recipient_name: Set(payload.recipient_name),
        recipient_phone: Set(payload.recipient_phone),
        shipping_address: Set(payload.shipping_address),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for (book_id, quantity, price) in lines {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            book_id: Set(book_id),
            quantity: Set(quantity),
            // Frozen here; later catalog price changes do not touch it.
            price_at_purchase: Set(price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(order_item_from_entity(item));
    }

    CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, user_id = %user.user_id, "order placed");

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if order.status != OrderStatus::Created {
        return Err(AppError::BadRequest(
            "Order is already being processed and can no longer be canceled".into(),
        ));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Canceled);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, "order canceled");

    Ok(ApiResponse::success(
        "Order canceled",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, size, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
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
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        total_price: model.total_price,
        status: model.status,
        recipient_name: model.recipient_name,
        recipient_phone: model.recipient_phone,
        shipping_address: model.shipping_address,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        book_id: model.book_id,
        quantity: model.quantity,
        price_at_purchase: model.price_at_purchase,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
