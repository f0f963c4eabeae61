use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    ActiveCountsDto, BrandResponseDto, OfferResponseDto, ProductResponseDto,
};
use crate::features::catalog::models::CatalogEntity;
use crate::features::catalog::repository::CatalogRepository;
use crate::features::categories::tree::CategoryTree;
use crate::shared::types::PaginationQuery;

/// Storefront reads over the catalog.
///
/// Product queries are always scoped to categories the taxonomy considers visible, so a
/// product under a deactivated branch never leaks even when its own flag is on.
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Fresh taxonomy snapshot
    pub async fn taxonomy(&self) -> Result<CategoryTree> {
        let categories = self.repo.list_categories().await?;
        Ok(CategoryTree::build(categories))
    }

    /// Active products inside `category_ids`, paginated.
    ///
    /// `category_ids` must already be restricted to visible categories.
    pub async fn products_in(
        &self,
        category_ids: &[i64],
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        if category_ids.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let (products, total) = self
            .repo
            .list_active_products(category_ids, pagination.offset(), pagination.limit())
            .await?;

        Ok((products.into_iter().map(Into::into).collect(), total))
    }

    /// Active products across every visible category
    pub async fn list_products(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let tree = self.taxonomy().await?;
        self.products_in(&tree.visible_ids(), pagination).await
    }

    /// Product detail by slug. Hidden when the product or its category is not visible.
    pub async fn get_product(&self, slug: &str) -> Result<ProductResponseDto> {
        let not_found = || AppError::NotFound(format!("Product '{}' not found", slug));

        let product = self
            .repo
            .find_active_product(slug)
            .await?
            .ok_or_else(not_found)?;

        let tree = self.taxonomy().await?;
        if !tree.is_visible(product.category_id) {
            return Err(not_found());
        }

        Ok(product.into())
    }

    pub async fn list_brands(&self) -> Result<Vec<BrandResponseDto>> {
        let brands = self.repo.list_active_brands().await?;
        Ok(brands.into_iter().map(Into::into).collect())
    }

    /// Offers that are active and inside their validity window right now
    pub async fn list_offers(&self) -> Result<Vec<OfferResponseDto>> {
        let now = Utc::now();
        let offers = self.repo.list_active_offers().await?;
        Ok(offers
            .into_iter()
            .filter(|o| o.is_live(now))
            .map(Into::into)
            .collect())
    }

    /// Active record counts for the admin dashboard
    pub async fn dashboard(&self) -> Result<ActiveCountsDto> {
        let mut counts = ActiveCountsDto::default();
        for entity in CatalogEntity::ALL {
            let count = self.repo.count_active(entity).await?;
            match entity {
                CatalogEntity::Category => counts.categories = count,
                CatalogEntity::Product => counts.products = count,
                CatalogEntity::Brand => counts.brands = count,
                CatalogEntity::Offer => counts.offers = count,
            }
        }
        Ok(counts)
    }
}
