use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::AdminCategoryDto;
use crate::features::admin::services::AdminService;
use crate::features::auth::model::AdminAccount;
use crate::features::catalog::dtos::{
    ActiveCountsDto, BrandInput, BrandResponseDto, CategoryInput, OfferInput, OfferResponseDto,
    ProductInput, ProductResponseDto,
};
use crate::shared::types::ApiResponse;

type Created<T> = (StatusCode, Json<ApiResponse<T>>);

fn created<T>(data: T, message: &str) -> Created<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(data), Some(message.to_string()), None)),
    )
}

fn updated<T>(data: T, message: &str) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(Some(data), Some(message.to_string()), None))
}

/// Active record counts
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Active counts per entity type", body = ApiResponse<ActiveCountsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dashboard(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ActiveCountsDto>>> {
    let counts = service.dashboard().await?;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<AdminCategoryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<CategoryInput>,
) -> Result<Created<AdminCategoryDto>> {
    dto.validate()?;

    let category = service.create_category(&dto).await?;
    tracing::info!(admin_id = admin.id, "Created category {}", category.id);
    Ok(created(category, "Category created successfully"))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<AdminCategoryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error or parent cycle")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<CategoryInput>,
) -> Result<Json<ApiResponse<AdminCategoryDto>>> {
    dto.validate()?;

    let category = service.update_category(id, &dto).await?;
    tracing::info!(admin_id = admin.id, "Updated category {}", id);
    Ok(updated(category, "Category updated successfully"))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "/api/admin/brands",
    request_body = BrandInput,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<BrandResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_brand(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<BrandInput>,
) -> Result<Created<BrandResponseDto>> {
    dto.validate()?;

    let brand = service.create_brand(&dto).await?;
    tracing::info!(admin_id = admin.id, "Created brand {}", brand.id);
    Ok(created(brand, "Brand created successfully"))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}",
    params(
        ("id" = i64, Path, description = "Brand id")
    ),
    request_body = BrandInput,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<BrandResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_brand(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<BrandInput>,
) -> Result<Json<ApiResponse<BrandResponseDto>>> {
    dto.validate()?;

    let brand = service.update_brand(id, &dto).await?;
    tracing::info!(admin_id = admin.id, "Updated brand {}", id);
    Ok(updated(brand, "Brand updated successfully"))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error or unknown reference")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_product(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<ProductInput>,
) -> Result<Created<ProductResponseDto>> {
    dto.validate()?;

    let product = service.create_product(&dto).await?;
    tracing::info!(admin_id = admin.id, "Created product {}", product.id);
    Ok(created(product, "Product created successfully"))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error or unknown reference")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ProductInput>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()?;

    let product = service.update_product(id, &dto).await?;
    tracing::info!(admin_id = admin.id, "Updated product {}", id);
    Ok(updated(product, "Product updated successfully"))
}

/// Create an offer
#[utoipa::path(
    post,
    path = "/api/admin/offers",
    request_body = OfferInput,
    responses(
        (status = 201, description = "Offer created", body = ApiResponse<OfferResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error or unknown product")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_offer(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<OfferInput>,
) -> Result<Created<OfferResponseDto>> {
    dto.validate()?;

    let offer = service.create_offer(&dto).await?;
    tracing::info!(admin_id = admin.id, "Created offer {}", offer.id);
    Ok(created(offer, "Offer created successfully"))
}

/// Update an offer
#[utoipa::path(
    put,
    path = "/api/admin/offers/{id}",
    params(
        ("id" = i64, Path, description = "Offer id")
    ),
    request_body = OfferInput,
    responses(
        (status = 200, description = "Offer updated", body = ApiResponse<OfferResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Offer not found"),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Validation error or unknown product")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_offer(
    admin: AdminAccount,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<OfferInput>,
) -> Result<Json<ApiResponse<OfferResponseDto>>> {
    dto.validate()?;

    let offer = service.update_offer(id, &dto).await?;
    tracing::info!(admin_id = admin.id, "Updated offer {}", id);
    Ok(updated(offer, "Offer updated successfully"))
}
