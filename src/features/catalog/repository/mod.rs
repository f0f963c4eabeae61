//! Persistence seam for the catalog.
//!
//! Services talk to [`CatalogRepository`] only; the PostgreSQL implementation lives in
//! [`postgres`]. Every read that feeds the storefront applies the `is_active`
//! coercion from [`crate::shared::active_flag`].

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::catalog::dtos::{BrandInput, CategoryInput, OfferInput, ProductInput};
use crate::features::catalog::models::{Brand, CatalogEntity, Category, Offer, Product};

pub use postgres::PgCatalogRepository;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every category row, active or not. Visibility is decided by the taxonomy.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>>;

    /// Active products whose category is in `category_ids` and is itself active,
    /// ordered by id, with the total count before pagination.
    async fn list_active_products(
        &self,
        category_ids: &[i64],
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64)>;

    /// Unpaged variant of [`Self::list_active_products`]
    async fn active_products_in(&self, category_ids: &[i64]) -> Result<Vec<Product>>;

    /// Active product by slug, regardless of category visibility
    async fn find_active_product(&self, slug: &str) -> Result<Option<Product>>;

    async fn find_product(&self, id: i64) -> Result<Option<Product>>;

    async fn list_active_brands(&self) -> Result<Vec<Brand>>;

    async fn find_brand(&self, id: i64) -> Result<Option<Brand>>;

    async fn list_active_offers(&self) -> Result<Vec<Offer>>;

    async fn count_active(&self, entity: CatalogEntity) -> Result<i64>;

    async fn create_category(&self, input: &CategoryInput) -> Result<Category>;

    async fn update_category(&self, id: i64, input: &CategoryInput) -> Result<Option<Category>>;

    async fn create_brand(&self, input: &BrandInput) -> Result<Brand>;

    async fn update_brand(&self, id: i64, input: &BrandInput) -> Result<Option<Brand>>;

    async fn create_product(&self, input: &ProductInput) -> Result<Product>;

    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<Option<Product>>;

    /// Inserts the offer and its product links in one transaction
    async fn create_offer(&self, input: &OfferInput) -> Result<Offer>;

    /// Replaces the offer row and its product links in one transaction
    async fn update_offer(&self, id: i64, input: &OfferInput) -> Result<Option<Offer>>;
}
