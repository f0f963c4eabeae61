use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating slugs used in storefront URLs
    /// Must be lowercase alphanumeric with single hyphens between words
    /// - Valid: "kitchen-appliances", "tv55", "a"
    /// - Invalid: "-kitchen", "kitchen-", "kitchen--tools", "Kitchen", "kitchen_tools"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    let invalid = urls.iter().any(|url| {
        let url = url.trim();
        url.is_empty() || !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/'))
    });
    if invalid {
        let mut err = ValidationError::new("image_url");
        err.message = Some("Image URLs must be absolute http(s) URLs or root-relative paths".into());
        return Err(err);
    }
    Ok(())
}
