use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{is_foreign_key_violation, is_unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{BrandInput, CategoryInput, OfferInput, ProductInput};
use crate::features::catalog::models::{Brand, CatalogEntity, Category, Offer, Product};
use crate::shared::active_flag::active_predicate;

use super::CatalogRepository;

const CATEGORY_COLUMNS: &str =
    "id, parent_id, name, slug, description, display_order, is_active, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "p.id, p.category_id, p.brand_id, p.name, p.slug, p.description, \
     p.price, p.image_urls, p.is_active, p.created_at, p.updated_at";

const BRAND_COLUMNS: &str = "id, name, slug, logo_url, is_active, created_at, updated_at";

const OFFER_COLUMNS: &str = "o.id, o.title, o.slug, o.description, \
     ARRAY(SELECT op.product_id FROM offer_products op WHERE op.offer_id = o.id ORDER BY op.product_id) AS product_ids, \
     o.starts_at, o.ends_at, o.is_active, o.created_at, o.updated_at";

/// Storefront product filter: product active, category active, category in `$1`
fn visible_product_filter() -> String {
    format!(
        "FROM products p JOIN categories c ON c.id = p.category_id \
         WHERE {} AND {} AND p.category_id = ANY($1)",
        active_predicate("p.is_active"),
        active_predicate("c.is_active"),
    )
}

fn read_failed(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", action, e);
        AppError::QueryFailed(e)
    }
}

fn write_failed(action: &'static str, slug: String) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if is_unique_violation(&e) {
            return AppError::Conflict(format!("Slug '{}' is already in use", slug));
        }
        if is_foreign_key_violation(&e) {
            return AppError::Validation("Referenced record does not exist".to_string());
        }
        tracing::error!("Failed to {}: {:?}", action, e);
        AppError::QueryFailed(e)
    }
}

/// PostgreSQL-backed catalog store
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let sql = format!("SELECT {} FROM categories ORDER BY id", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failed("list categories"))
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failed("get category"))
    }

    async fn list_active_products(
        &self,
        category_ids: &[i64],
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64)> {
        let filter = visible_product_filter();

        let count_sql = format!("SELECT COUNT(*) {}", filter);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(category_ids)
            .fetch_one(&self.pool)
            .await
            .map_err(read_failed("count active products"))?;

        let page_sql = format!(
            "SELECT {} {} ORDER BY p.id OFFSET $2 LIMIT $3",
            PRODUCT_COLUMNS, filter
        );
        let products = sqlx::query_as::<_, Product>(&page_sql)
            .bind(category_ids)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failed("list active products"))?;

        Ok((products, total))
    }

    async fn active_products_in(&self, category_ids: &[i64]) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {} {} ORDER BY p.id",
            PRODUCT_COLUMNS,
            visible_product_filter()
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(category_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failed("enumerate active products"))
    }

    async fn find_active_product(&self, slug: &str) -> Result<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products p WHERE p.slug = $1 AND {}",
            PRODUCT_COLUMNS,
            active_predicate("p.is_active")
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failed("get product by slug"))
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products p WHERE p.id = $1", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failed("get product"))
    }

    async fn list_active_brands(&self) -> Result<Vec<Brand>> {
        let sql = format!(
            "SELECT {} FROM brands WHERE {} ORDER BY id",
            BRAND_COLUMNS,
            active_predicate("is_active")
        );
        sqlx::query_as::<_, Brand>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failed("list active brands"))
    }

    async fn find_brand(&self, id: i64) -> Result<Option<Brand>> {
        let sql = format!("SELECT {} FROM brands WHERE id = $1", BRAND_COLUMNS);
        sqlx::query_as::<_, Brand>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failed("get brand"))
    }

    async fn list_active_offers(&self) -> Result<Vec<Offer>> {
        let sql = format!(
            "SELECT {} FROM offers o WHERE {} ORDER BY o.id",
            OFFER_COLUMNS,
            active_predicate("o.is_active")
        );
        sqlx::query_as::<_, Offer>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failed("list active offers"))
    }

    async fn count_active(&self, entity: CatalogEntity) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            entity.table(),
            active_predicate("is_active")
        );
        sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(read_failed("count active rows"))
    }

    async fn create_category(&self, input: &CategoryInput) -> Result<Category> {
        let sql = format!(
            r#"
            INSERT INTO categories (parent_id, name, slug, description, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.display_order)
            .bind(input.is_active.is_active())
            .fetch_one(&self.pool)
            .await
            .map_err(write_failed("create category", input.slug.clone()))
    }

    async fn update_category(&self, id: i64, input: &CategoryInput) -> Result<Option<Category>> {
        let sql = format!(
            r#"
            UPDATE categories
            SET parent_id = $2, name = $3, slug = $4, description = $5,
                display_order = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.display_order)
            .bind(input.is_active.is_active())
            .fetch_optional(&self.pool)
            .await
            .map_err(write_failed("update category", input.slug.clone()))
    }

    async fn create_brand(&self, input: &BrandInput) -> Result<Brand> {
        let sql = format!(
            r#"
            INSERT INTO brands (name, slug, logo_url, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BRAND_COLUMNS
        );
        sqlx::query_as::<_, Brand>(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.logo_url)
            .bind(input.is_active.is_active())
            .fetch_one(&self.pool)
            .await
            .map_err(write_failed("create brand", input.slug.clone()))
    }

    async fn update_brand(&self, id: i64, input: &BrandInput) -> Result<Option<Brand>> {
        let sql = format!(
            r#"
            UPDATE brands
            SET name = $2, slug = $3, logo_url = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BRAND_COLUMNS
        );
        sqlx::query_as::<_, Brand>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.logo_url)
            .bind(input.is_active.is_active())
            .fetch_optional(&self.pool)
            .await
            .map_err(write_failed("update brand", input.slug.clone()))
    }

    async fn create_product(&self, input: &ProductInput) -> Result<Product> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO products (category_id, brand_id, name, slug, description, price, image_urls, is_active)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT {} FROM p
            "#,
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(input.category_id)
            .bind(input.brand_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image_urls)
            .bind(input.is_active.is_active())
            .fetch_one(&self.pool)
            .await
            .map_err(write_failed("create product", input.slug.clone()))
    }

    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<Option<Product>> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE products
                SET category_id = $2, brand_id = $3, name = $4, slug = $5, description = $6,
                    price = $7, image_urls = $8, is_active = $9, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM p
            "#,
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(input.category_id)
            .bind(input.brand_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image_urls)
            .bind(input.is_active.is_active())
            .fetch_optional(&self.pool)
            .await
            .map_err(write_failed("update product", input.slug.clone()))
    }

    async fn create_offer(&self, input: &OfferInput) -> Result<Offer> {
        let mut tx = self.pool.begin().await.map_err(read_failed("begin transaction"))?;

        let offer_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO offers (title, slug, description, starts_at, ends_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.is_active.is_active())
        .fetch_one(&mut *tx)
        .await
        .map_err(write_failed("create offer", input.slug.clone()))?;

        sqlx::query(
            "INSERT INTO offer_products (offer_id, product_id) SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(offer_id)
        .bind(input.normalized_product_ids())
        .execute(&mut *tx)
        .await
        .map_err(write_failed("link offer products", input.slug.clone()))?;

        let sql = format!("SELECT {} FROM offers o WHERE o.id = $1", OFFER_COLUMNS);
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(offer_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(read_failed("reload offer"))?;

        tx.commit().await.map_err(read_failed("commit offer"))?;
        Ok(offer)
    }

    async fn update_offer(&self, id: i64, input: &OfferInput) -> Result<Option<Offer>> {
        let mut tx = self.pool.begin().await.map_err(read_failed("begin transaction"))?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE offers
            SET title = $2, slug = $3, description = $4, starts_at = $5, ends_at = $6,
                is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.is_active.is_active())
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_failed("update offer", input.slug.clone()))?;

        if updated.is_none() {
            tx.rollback().await.map_err(read_failed("rollback offer"))?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM offer_products WHERE offer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(read_failed("unlink offer products"))?;

        sqlx::query(
            "INSERT INTO offer_products (offer_id, product_id) SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(id)
        .bind(input.normalized_product_ids())
        .execute(&mut *tx)
        .await
        .map_err(write_failed("link offer products", input.slug.clone()))?;

        let sql = format!("SELECT {} FROM offers o WHERE o.id = $1", OFFER_COLUMNS);
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(read_failed("reload offer"))?;

        tx.commit().await.map_err(read_failed("commit offer"))?;
        Ok(Some(offer))
    }
}
