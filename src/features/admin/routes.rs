use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::admin_gate;
use crate::features::auth::AdminDirectory;

/// Create admin routes (all require an active admin account)
///
/// Meant to be nested under `/api/admin`.
pub fn routes(admin_service: Arc<AdminService>, directory: Arc<dyn AdminDirectory>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/categories", post(handlers::create_category))
        .route("/categories/{id}", put(handlers::update_category))
        .route("/brands", post(handlers::create_brand))
        .route("/brands/{id}", put(handlers::update_brand))
        .route("/products", post(handlers::create_product))
        .route("/products/{id}", put(handlers::update_product))
        .route("/offers", post(handlers::create_offer))
        .route("/offers/{id}", put(handlers::update_offer))
        .route_layer(from_fn_with_state(directory, admin_gate))
        .with_state(admin_service)
}
