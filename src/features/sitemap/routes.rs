use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::sitemap::handlers;
use crate::features::sitemap::services::SitemapService;

/// Create routes for the sitemap feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<SitemapService>) -> Router {
    Router::new()
        .route("/sitemap.xml", get(handlers::get_sitemap))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{brand, category, product, InMemoryCatalogRepository};
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use std::time::Duration;

    fn server(repo: InMemoryCatalogRepository) -> TestServer {
        let service = SitemapService::new(
            Arc::new(repo),
            "https://shop.example".to_string(),
            Duration::ZERO,
        );
        TestServer::new(routes(Arc::new(service))).unwrap()
    }

    #[tokio::test]
    async fn test_sitemap_is_served_as_xml() {
        let repo = InMemoryCatalogRepository::default()
            .with_categories(vec![
                category(1, None, "Lighting", true),
                category(2, None, "Garden", false),
            ])
            .with_products(vec![
                product(1, 1, "desk-lamp", true),
                product(2, 2, "hose", true),
            ])
            .with_brands(vec![brand(1, "acme", true)]);

        let response = server(repo).get("/sitemap.xml").await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE).to_str().unwrap(),
            "application/xml"
        );
        let xml = response.text();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://shop.example/lighting</loc>"));
        assert!(xml.contains("<loc>https://shop.example/product/desk-lamp</loc>"));
        assert!(!xml.contains("garden"));
        assert!(!xml.contains("hose"));
    }

    #[tokio::test]
    async fn test_store_failure_is_500_without_partial_document() {
        let response = server(InMemoryCatalogRepository::default().failing())
            .get("/sitemap.xml")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.text().contains("<urlset"));
    }
}
