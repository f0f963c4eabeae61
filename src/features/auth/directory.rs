use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AdminAccount;

/// Lookup of admin accounts for the access gate
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn find_admin(&self, id: i64) -> Result<Option<AdminAccount>>;
}

pub struct PgAdminDirectory {
    pool: PgPool,
}

impl PgAdminDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminDirectory for PgAdminDirectory {
    async fn find_admin(&self, id: i64) -> Result<Option<AdminAccount>> {
        sqlx::query_as::<_, AdminAccount>(
            r#"
            SELECT id, name, email, is_active
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load admin {}: {:?}", id, e);
            AppError::QueryFailed(e)
        })
    }
}
