use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Book;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub authors: String,
    pub categories: String,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: String,
    pub price: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Partial update; isbn is immutable after creation and has no field here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub categories: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookList {
    #[schema(value_type = Vec<Book>)]
    pub items: Vec<Book>,
}
