use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    entity::{
        books::Entity as Books,
        reviews::{
            ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews,
            Model as ReviewModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Review, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn validate_rating(rating: i32) -> AppResult<()> {
    if (1..=5).contains(&rating) {
        return Ok(());
    }
    let mut details = BTreeMap::new();
    details.insert("rating".to_string(), "must be between 1 and 5".to_string());
    Err(AppError::Validation(details))
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    book_id: Uuid,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    validate_rating(payload.rating)?;
    if payload.content.trim().is_empty() {
        let mut details = BTreeMap::new();
        details.insert("content".to_string(), "must not be empty".to_string());
        return Err(AppError::Validation(details));
    }

    let book = Books::find_by_id(book_id).one(&state.orm).await?;
    if book.is_none() {
        return Err(AppError::NotFound);
    }

    // The same user may review the same book more than once.
    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        book_id: Set(book_id),
        rating: Set(payload.rating),
        content: Set(payload.content),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Review created",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

pub async fn list_reviews(state: &AppState, book_id: Uuid) -> AppResult<ApiResponse<ReviewList>> {
    let items = Reviews::find()
        .filter(ReviewCol::BookId.eq(book_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        ReviewList { items },
        Some(Meta::empty()),
    ))
}

pub async fn update_review(
    state: &AppState,
    user: &AuthUser,
    review_id: Uuid,
    payload: UpdateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }

    let review = Reviews::find_by_id(review_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Only the author may edit, admins included.
    if review.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let mut active: ReviewActive = review.into();
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    active.updated_at = Set(Utc::now().into());

    let review = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Review updated",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    review_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let review = Reviews::find_by_id(review_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if user.role != Role::Admin && review.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    Reviews::delete_by_id(review.id).exec(&state.orm).await?;

    Ok(ApiResponse::message_only("Review deleted"))
}

fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        user_id: model.user_id,
        book_id: model.book_id,
        rating: model.rating,
        content: model.content,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
