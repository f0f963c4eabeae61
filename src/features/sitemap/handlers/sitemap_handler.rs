use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::error::Result;
use crate::features::sitemap::services::SitemapService;

/// XML sitemap of the storefront
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap document", content_type = "application/xml", body = String),
        (status = 500, description = "Catalog could not be enumerated")
    ),
    tag = "sitemap"
)]
pub async fn get_sitemap(State(service): State<Arc<SitemapService>>) -> Result<Response> {
    let xml = service.sitemap().await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml.as_str().to_owned()).into_response())
}
