use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::books::{BookList, CreateBookRequest, UpdateBookRequest},
    entity::books::{
        ActiveModel as BookActive, Column as BookCol, Entity as Books, Model as BookModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Book,
    response::{ApiResponse, Meta},
    routes::params::{BookQuery, BookSortField, SortOrder, parse_book_sort},
};
use crate::state::AppState;

pub async fn list_books(state: &AppState, query: BookQuery) -> AppResult<ApiResponse<BookList>> {
    let (page, size, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(keyword) = query.keyword.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(BookCol::Title.contains(keyword))
                .add(BookCol::Authors.contains(keyword)),
        );
    }

    if let Some(category) = query.category.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(BookCol::Categories.contains(category));
    }

    let (sort_field, sort_order) = parse_book_sort(query.sort.as_deref());
    let sort_col = match sort_field {
        BookSortField::CreatedAt => BookCol::CreatedAt,
        BookSortField::Price => BookCol::Price,
        BookSortField::Title => BookCol::Title,
        BookSortField::Id => BookCol::Id,
    };

    let mut finder = Books::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(book_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success("Books", BookList { items }, Some(meta)))
}

pub async fn get_book(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Book>> {
    let result = Books::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(book_from_entity);
    let result = match result {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Book", result, None))
}

fn validate_book(payload: &CreateBookRequest) -> AppResult<()> {
    let mut details = BTreeMap::new();
    if payload.title.trim().is_empty() {
        details.insert("title".to_string(), "must not be empty".to_string());
    }
    if payload.isbn.trim().is_empty() {
        details.insert("isbn".to_string(), "must not be empty".to_string());
    }
    if payload.price < 0 {
        details.insert("price".to_string(), "must not be negative".to_string());
    }
    if payload.stock_quantity < 0 {
        details.insert("stock_quantity".to_string(), "must not be negative".to_string());
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(details))
    }
}

pub async fn create_book(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookRequest,
) -> AppResult<ApiResponse<Book>> {
    ensure_admin(user)?;
    validate_book(&payload)?;

    let exists = Books::find()
        .filter(BookCol::Isbn.eq(payload.isbn.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict("ISBN is already registered".into()));
    }

    let book = BookActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        authors: Set(payload.authors),
        categories: Set(payload.categories),
        publisher: Set(payload.publisher),
        publication_date: Set(payload.publication_date),
        isbn: Set(payload.isbn),
        price: Set(payload.price),
        description: Set(payload.description),
        stock_quantity: Set(payload.stock_quantity),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Book created",
        book_from_entity(book),
        Some(Meta::empty()),
    ))
}

pub async fn update_book(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBookRequest,
) -> AppResult<ApiResponse<Book>> {
    ensure_admin(user)?;

    let existing = Books::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    if payload.price.is_some_and(|p| p < 0) {
        let mut details = BTreeMap::new();
        details.insert("price".to_string(), "must not be negative".to_string());
        return Err(AppError::Validation(details));
    }
    if payload.stock_quantity.is_some_and(|s| s < 0) {
        let mut details = BTreeMap::new();
        details.insert("stock_quantity".to_string(), "must not be negative".to_string());
        return Err(AppError::Validation(details));
    }

    let mut active: BookActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(authors) = payload.authors {
        active.authors = Set(authors);
    }
    if let Some(categories) = payload.categories {
        active.categories = Set(categories);
    }
    if let Some(publisher) = payload.publisher {
        active.publisher = Set(Some(publisher));
    }
    if let Some(publication_date) = payload.publication_date {
        active.publication_date = Set(Some(publication_date));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        active.stock_quantity = Set(stock_quantity);
    }
    active.updated_at = Set(Utc::now().into());

    let book = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        book_from_entity(book),
        Some(Meta::empty()),
    ))
}

pub async fn delete_book(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Books::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::message_only("Deleted"))
}

pub fn book_from_entity(model: BookModel) -> Book {
    Book {
        id: model.id,
        title: model.title,
        authors: model.authors,
        categories: model.categories,
        publisher: model.publisher,
        publication_date: model.publication_date,
        isbn: model.isbn,
        price: model.price,
        description: model.description,
        stock_quantity: model.stock_quantity,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
