mod brand;
mod offer;
mod product;

pub use brand::Brand;
pub use offer::Offer;
pub use product::Product;

pub use crate::features::categories::models::Category;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entity types that carry an `is_active` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEntity {
    Category,
    Product,
    Brand,
    Offer,
}

impl CatalogEntity {
    pub const ALL: [CatalogEntity; 4] = [
        CatalogEntity::Category,
        CatalogEntity::Product,
        CatalogEntity::Brand,
        CatalogEntity::Offer,
    ];

    pub fn table(self) -> &'static str {
        match self {
            CatalogEntity::Category => "categories",
            CatalogEntity::Product => "products",
            CatalogEntity::Brand => "brands",
            CatalogEntity::Offer => "offers",
        }
    }
}
