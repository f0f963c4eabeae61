use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::AdminCategoryDto;
use crate::features::catalog::dtos::{
    ActiveCountsDto, BrandInput, BrandResponseDto, CategoryInput, OfferInput, OfferResponseDto,
    ProductInput, ProductResponseDto,
};
use crate::features::catalog::repository::CatalogRepository;
use crate::features::catalog::services::CatalogService;
use crate::features::categories::tree::CategoryTree;

/// Service for admin catalog maintenance.
///
/// Inputs arrive already validated field by field; this layer checks the references
/// between rows (parents, categories, brands, offer products) before writing.
pub struct AdminService {
    repo: Arc<dyn CatalogRepository>,
    catalog: Arc<CatalogService>,
}

impl AdminService {
    pub fn new(repo: Arc<dyn CatalogRepository>, catalog: Arc<CatalogService>) -> Self {
        Self { repo, catalog }
    }

    pub async fn dashboard(&self) -> Result<ActiveCountsDto> {
        self.catalog.dashboard().await
    }

    // =========================================================================
    // CATEGORIES
    // =========================================================================

    pub async fn create_category(&self, input: &CategoryInput) -> Result<AdminCategoryDto> {
        if let Some(parent_id) = input.parent_id {
            self.ensure_category_exists(parent_id).await?;
        }

        let category = self.repo.create_category(input).await?;
        Ok(category.into())
    }

    pub async fn update_category(
        &self,
        id: i64,
        input: &CategoryInput,
    ) -> Result<AdminCategoryDto> {
        let tree = CategoryTree::build(self.repo.list_categories().await?);
        if tree.get(id).is_none() {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        if let Some(parent_id) = input.parent_id {
            if tree.get(parent_id).is_none() {
                return Err(parent_missing(parent_id));
            }
        }
        if tree.would_create_cycle(id, input.parent_id) {
            return Err(AppError::Validation(
                "A category cannot be moved under itself or one of its descendants".to_string(),
            ));
        }

        self.repo
            .update_category(id, input)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    // =========================================================================
    // BRANDS
    // =========================================================================

    pub async fn create_brand(&self, input: &BrandInput) -> Result<BrandResponseDto> {
        let brand = self.repo.create_brand(input).await?;
        Ok(brand.into())
    }

    pub async fn update_brand(&self, id: i64, input: &BrandInput) -> Result<BrandResponseDto> {
        self.repo
            .update_brand(id, input)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Brand {} not found", id)))
    }

    // =========================================================================
    // PRODUCTS
    // =========================================================================

    async fn check_product_references(&self, input: &ProductInput) -> Result<()> {
        if self.repo.find_category(input.category_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Category {} does not exist",
                input.category_id
            )));
        }
        if let Some(brand_id) = input.brand_id {
            if self.repo.find_brand(brand_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Brand {} does not exist",
                    brand_id
                )));
            }
        }
        Ok(())
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductResponseDto> {
        self.check_product_references(input).await?;
        let product = self.repo.create_product(input).await?;
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        id: i64,
        input: &ProductInput,
    ) -> Result<ProductResponseDto> {
        if self.repo.find_product(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
        self.check_product_references(input).await?;

        self.repo
            .update_product(id, input)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    // =========================================================================
    // OFFERS
    // =========================================================================

    async fn check_offer_products(&self, input: &OfferInput) -> Result<()> {
        for product_id in input.normalized_product_ids() {
            if self.repo.find_product(product_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Product {} does not exist",
                    product_id
                )));
            }
        }
        Ok(())
    }

    pub async fn create_offer(&self, input: &OfferInput) -> Result<OfferResponseDto> {
        self.check_offer_products(input).await?;
        let offer = self.repo.create_offer(input).await?;
        Ok(offer.into())
    }

    pub async fn update_offer(&self, id: i64, input: &OfferInput) -> Result<OfferResponseDto> {
        self.check_offer_products(input).await?;
        self.repo
            .update_offer(id, input)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", id)))
    }

    async fn ensure_category_exists(&self, id: i64) -> Result<()> {
        match self.repo.find_category(id).await? {
            Some(_) => Ok(()),
            None => Err(parent_missing(id)),
        }
    }
}

fn parent_missing(id: i64) -> AppError {
    AppError::Validation(format!("Parent category {} does not exist", id))
}
