use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::OrderStatus;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self.size.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * size;
        (page, size, offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSortField {
    CreatedAt,
    Price,
    Title,
    Id,
}

/// Parses a `"field,direction"` sort expression against the catalog
/// allow-list. Anything else falls back to `created_at` descending.
pub fn parse_book_sort(sort: Option<&str>) -> (BookSortField, SortOrder) {
    const FALLBACK: (BookSortField, SortOrder) = (BookSortField::CreatedAt, SortOrder::Desc);

    let Some(sort) = sort else {
        return FALLBACK;
    };
    let mut parts = sort.splitn(2, ',');
    let field = parts.next().unwrap_or("").trim();
    let direction = parts.next().unwrap_or("").trim();

    let field = match field {
        "price" => BookSortField::Price,
        "title" => BookSortField::Title,
        "id" => BookSortField::Id,
        "created_at" => BookSortField::CreatedAt,
        _ => return FALLBACK,
    };
    let direction = match direction.to_ascii_lowercase().as_str() {
        "asc" => SortOrder::Asc,
        "desc" => SortOrder::Desc,
        _ => return FALLBACK,
    };
    (field, direction)
}

// page/size are inlined rather than flattened: serde_urlencoded cannot
// deserialize numeric fields through #[serde(flatten)].
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl BookQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            size: self.size,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            size: self.size,
        }
    }
}
