//! Storefront XML sitemap.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/sitemap.xml` | No | Sitemap of visible categories, products, brands and live offers |

pub mod builder;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::SitemapService;
