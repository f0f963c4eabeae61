//! Storefront catalog: products, brands and offers.
//!
//! Everything served here honours the `is_active` flag of the row itself and, for
//! products, the effective visibility of the owning category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/products` | No | Paginated products in visible categories |
//! | GET | `/api/products/{slug}` | No | Product detail |
//! | GET | `/api/brands` | No | Active brands |
//! | GET | `/api/offers` | No | Live offers |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{CatalogRepository, PgCatalogRepository};
pub use services::CatalogService;
