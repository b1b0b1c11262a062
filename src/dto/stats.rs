use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema, FromRow)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: i64,
    pub order_count: i64,
}

#[derive(Debug, Serialize, ToSchema, FromRow)]
pub struct TopSeller {
    pub book_id: Uuid,
    pub title: String,
    pub total_sold: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TopSellersQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DailySalesList {
    #[schema(value_type = Vec<DailySales>)]
    pub items: Vec<DailySales>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TopSellerList {
    #[schema(value_type = Vec<TopSeller>)]
    pub items: Vec<TopSeller>,
}
