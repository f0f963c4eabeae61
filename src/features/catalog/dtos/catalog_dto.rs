use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::catalog::models::{Brand, Offer, Product};

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i64,
    pub category_id: i64,
    pub brand_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_urls: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            brand_id: p.brand_id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            image_urls: p.image_urls,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response DTO for brand
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandResponseDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Brand> for BrandResponseDto {
    fn from(b: Brand) -> Self {
        Self {
            id: b.id,
            name: b.name,
            slug: b.slug,
            logo_url: b.logo_url,
            is_active: b.is_active,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Response DTO for offer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferResponseDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub product_ids: Vec<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Offer> for OfferResponseDto {
    fn from(o: Offer) -> Self {
        Self {
            id: o.id,
            title: o.title,
            slug: o.slug,
            description: o.description,
            product_ids: o.product_ids,
            starts_at: o.starts_at,
            ends_at: o.ends_at,
            is_active: o.is_active,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Active record counts per entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveCountsDto {
    pub categories: i64,
    pub products: i64,
    pub brands: i64,
    pub offers: i64,
}
