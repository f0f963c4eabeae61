//! Catalog maintenance for admins.
//!
//! Every route sits behind [`crate::features::auth::guards::admin_gate`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/dashboard` | Admin | Active counts per entity type |
//! | POST | `/api/admin/categories` | Admin | Create category |
//! | PUT | `/api/admin/categories/{id}` | Admin | Replace category (cycle-checked) |
//! | POST | `/api/admin/brands` | Admin | Create brand |
//! | PUT | `/api/admin/brands/{id}` | Admin | Replace brand |
//! | POST | `/api/admin/products` | Admin | Create product |
//! | PUT | `/api/admin/products/{id}` | Admin | Replace product |
//! | POST | `/api/admin/offers` | Admin | Create offer |
//! | PUT | `/api/admin/offers/{id}` | Admin | Replace offer and its products |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
