use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::active_flag::ActiveFlag;

#[derive(Debug, Clone, FromRow)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    #[sqlx(try_from = "ActiveFlag")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
