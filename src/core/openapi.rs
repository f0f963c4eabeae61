use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::sitemap::handlers as sitemap_handlers;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::list_category_products,
        // Catalog (public)
        catalog_handlers::list_products,
        catalog_handlers::get_product,
        catalog_handlers::list_brands,
        catalog_handlers::list_offers,
        // Sitemap (public)
        sitemap_handlers::get_sitemap,
        // Admin
        admin_handlers::get_dashboard,
        admin_handlers::create_category,
        admin_handlers::update_category,
        admin_handlers::create_brand,
        admin_handlers::update_brand,
        admin_handlers::create_product,
        admin_handlers::update_product,
        admin_handlers::create_offer,
        admin_handlers::update_offer,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::PrincipalKind,
            auth::model::AdminAccount,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::ResolvedCategoryDto,
            categories_handlers::CategoryListing,
            ApiResponse<categories_handlers::CategoryListing>,
            ApiResponse<categories_dtos::ResolvedCategoryDto>,
            // Catalog
            catalog_dtos::ProductResponseDto,
            catalog_dtos::BrandResponseDto,
            catalog_dtos::OfferResponseDto,
            catalog_dtos::ActiveCountsDto,
            catalog_dtos::CategoryInput,
            catalog_dtos::BrandInput,
            catalog_dtos::ProductInput,
            catalog_dtos::OfferInput,
            ApiResponse<Vec<catalog_dtos::ProductResponseDto>>,
            ApiResponse<catalog_dtos::ProductResponseDto>,
            ApiResponse<Vec<catalog_dtos::BrandResponseDto>>,
            ApiResponse<catalog_dtos::BrandResponseDto>,
            ApiResponse<Vec<catalog_dtos::OfferResponseDto>>,
            ApiResponse<catalog_dtos::OfferResponseDto>,
            ApiResponse<catalog_dtos::ActiveCountsDto>,
            // Admin
            admin_dtos::AdminCategoryDto,
            ApiResponse<admin_dtos::AdminCategoryDto>,
        )
    ),
    tags(
        (name = "categories", description = "Category taxonomy and storefront aliases (public)"),
        (name = "catalog", description = "Products, brands and offers (public)"),
        (name = "sitemap", description = "XML sitemap (public)"),
        (name = "admin", description = "Catalog maintenance (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront Catalog API",
        version = "0.1.0",
        description = "API documentation for the storefront catalog",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
