//! Admin write payloads. Updates are full replacements (PUT semantics).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::shared::active_flag::ActiveFlag;

fn default_active() -> ActiveFlag {
    ActiveFlag(true)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug must be 1-255 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase letters and digits separated by single hyphens"
        )
    )]
    pub slug: String,

    pub parent_id: Option<i64>,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    /// Accepts `true`, `1` or `"1"`
    #[serde(default = "default_active")]
    #[schema(value_type = bool)]
    pub is_active: ActiveFlag,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BrandInput {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug must be 1-255 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase letters and digits separated by single hyphens"
        )
    )]
    pub slug: String,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    #[serde(default = "default_active")]
    #[schema(value_type = bool)]
    pub is_active: ActiveFlag,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    pub category_id: i64,

    pub brand_id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug must be 1-255 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase letters and digits separated by single hyphens"
        )
    )]
    pub slug: String,

    #[validate(length(max = 20000, message = "Description must not exceed 20000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "crate::shared::validation::validate_non_negative_price"))]
    pub price: Decimal,

    #[serde(default)]
    #[validate(
        length(max = 20, message = "At most 20 images per product"),
        custom(function = "crate::shared::validation::validate_image_urls")
    )]
    pub image_urls: Vec<String>,

    #[serde(default = "default_active")]
    #[schema(value_type = bool)]
    pub is_active: ActiveFlag,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_offer_window", skip_on_field_errors = false))]
pub struct OfferInput {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug must be 1-255 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase letters and digits separated by single hyphens"
        )
    )]
    pub slug: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub product_ids: Vec<i64>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default = "default_active")]
    #[schema(value_type = bool)]
    pub is_active: ActiveFlag,
}

fn validate_offer_window(input: &OfferInput) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (input.starts_at, input.ends_at) {
        if end <= start {
            let mut err = ValidationError::new("offer_window");
            err.message = Some("ends_at must be after starts_at".into());
            return Err(err);
        }
    }
    Ok(())
}

impl OfferInput {
    /// Product ids sorted and de-duplicated, as stored in `offer_products`
    pub fn normalized_product_ids(&self) -> Vec<i64> {
        let mut ids = self.product_ids.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_input_accepts_integer_and_string_flags() {
        for flag in [json!(1), json!("1"), json!(true)] {
            let input: CategoryInput = serde_json::from_value(json!({
                "name": "Kitchen",
                "slug": "kitchen-appliances",
                "is_active": flag,
            }))
            .unwrap();
            assert!(input.is_active.is_active());
        }
    }

    #[test]
    fn test_missing_flag_defaults_to_active() {
        let input: BrandInput = serde_json::from_value(json!({
            "name": "Acme",
            "slug": "acme",
        }))
        .unwrap();
        assert!(input.is_active.is_active());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_bad_slug_and_negative_price_are_field_errors() {
        let input: ProductInput = serde_json::from_value(json!({
            "category_id": 1,
            "name": "Oven",
            "slug": "Big Oven",
            "price": "-5.00",
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_offer_window_must_be_ordered() {
        let input: OfferInput = serde_json::from_value(json!({
            "title": "Summer sale",
            "slug": "summer-sale",
            "starts_at": "2026-07-01T00:00:00Z",
            "ends_at": "2026-06-01T00:00:00Z",
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_offer_product_ids_are_normalized() {
        let input: OfferInput = serde_json::from_value(json!({
            "title": "Bundle",
            "slug": "bundle",
            "product_ids": [3, 1, 3, 2],
        }))
        .unwrap();

        assert_eq!(input.normalized_product_ids(), vec![1, 2, 3]);
    }
}
