use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Book;

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteBookList {
    #[schema(value_type = Vec<Book>)]
    pub items: Vec<Book>,
}
