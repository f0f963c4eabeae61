//! Category taxonomy and storefront aliases.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Visible categories, flat or `?tree=true` |
//! | GET | `/api/categories/{key}` | No | Resolve alias, id or slug |
//! | GET | `/api/categories/{key}/products` | No | Products of the category and its visible descendants |

pub mod aliases;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::CategoryService;
