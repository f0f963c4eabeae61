use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the storefront catalog
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{slug}", get(handlers::get_product))
        .route("/api/brands", get(handlers::list_brands))
        .route("/api/offers", get(handlers::list_offers))
        .with_state(service)
}
