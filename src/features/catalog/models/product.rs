use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::shared::active_flag::ActiveFlag;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub brand_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_urls: Vec<String>,
    #[sqlx(try_from = "ActiveFlag")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
