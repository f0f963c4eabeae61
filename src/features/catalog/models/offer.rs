use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::active_flag::ActiveFlag;

/// Promotional offer grouping one or more products
#[derive(Debug, Clone, FromRow)]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// Filled from `offer_products`, ordered by product id
    pub product_ids: Vec<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[sqlx(try_from = "ActiveFlag")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Active and inside its validity window at `now`. Open ends are unbounded.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.map_or(true, |start| start <= now)
            && self.ends_at.map_or(true, |end| now < end)
    }
}
