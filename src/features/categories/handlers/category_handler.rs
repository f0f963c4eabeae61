use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::catalog::dtos::ProductResponseDto;
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, ResolvedCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Query params for listing categories
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Flat or nested category listing
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryListing {
    Flat(Vec<CategoryResponseDto>),
    Tree(Vec<CategoryTreeDto>),
}

/// List visible categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("tree" = Option<bool>, Query, description = "Return tree structure if true")
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<CategoryListing>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<CategoryListing>>> {
    let listing = if query.tree {
        CategoryListing::Tree(service.list_tree().await?)
    } else {
        CategoryListing::Flat(service.list().await?)
    };
    Ok(Json(ApiResponse::success(Some(listing), None, None)))
}

/// Resolve a category by alias, id or slug
#[utoipa::path(
    get,
    path = "/api/categories/{key}",
    params(
        ("key" = String, Path, description = "Alias (e.g. kitchen), numeric id or slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<ResolvedCategoryDto>),
        (status = 404, description = "Category not found or hidden")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<ResolvedCategoryDto>>> {
    let category = service.get(&key).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// List products of a category and its visible descendants (paginated)
#[utoipa::path(
    get,
    path = "/api/categories/{key}/products",
    params(
        ("key" = String, Path, description = "Alias (e.g. kitchen), numeric id or slug"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Active products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 404, description = "Category not found or hidden")
    ),
    tag = "categories"
)]
pub async fn list_category_products(
    State(service): State<Arc<CategoryService>>,
    Path(key): Path<String>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service.products(&key, &params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
