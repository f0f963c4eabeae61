use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::active_flag::ActiveFlag;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub display_order: i32,
    #[sqlx(try_from = "ActiveFlag")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
