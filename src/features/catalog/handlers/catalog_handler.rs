use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::catalog::dtos::{BrandResponseDto, OfferResponseDto, ProductResponseDto};
use crate::features::catalog::services::CatalogService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List storefront products (paginated)
#[utoipa::path(
    get,
    path = "/api/products",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Active products in visible categories", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    State(service): State<Arc<CatalogService>>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service.list_products(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get product by slug
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found or hidden")
    ),
    tag = "catalog"
)]
pub async fn get_product(
    State(service): State<Arc<CatalogService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get_product(&slug).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// List active brands
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "Active brands", body = ApiResponse<Vec<BrandResponseDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_brands(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<BrandResponseDto>>>> {
    let brands = service.list_brands().await?;
    Ok(Json(ApiResponse::success(Some(brands), None, None)))
}

/// List offers that are live right now
#[utoipa::path(
    get,
    path = "/api/offers",
    responses(
        (status = 200, description = "Live offers", body = ApiResponse<Vec<OfferResponseDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_offers(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<OfferResponseDto>>>> {
    let offers = service.list_offers().await?;
    Ok(Json(ApiResponse::success(Some(offers), None, None)))
}
