use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::Result;
use crate::features::catalog::repository::CatalogRepository;
use crate::features::categories::tree::CategoryTree;
use crate::features::sitemap::builder::{CatalogSnapshot, SitemapBuilder};

struct CachedSitemap {
    xml: Arc<String>,
    built_at: Instant,
}

/// Loads the catalog snapshot and renders the sitemap.
///
/// Any failing enumeration fails the whole request; a partial sitemap is never served.
pub struct SitemapService {
    repo: Arc<dyn CatalogRepository>,
    base_url: String,
    cache_ttl: Duration,
    cache: RwLock<Option<CachedSitemap>>,
}

impl SitemapService {
    /// A zero `cache_ttl` disables caching
    pub fn new(repo: Arc<dyn CatalogRepository>, base_url: String, cache_ttl: Duration) -> Self {
        Self {
            repo,
            base_url,
            cache_ttl,
            cache: RwLock::new(None),
        }
    }

    async fn load_snapshot(&self) -> Result<CatalogSnapshot> {
        let tree = CategoryTree::build(self.repo.list_categories().await?);
        let products = self.repo.active_products_in(&tree.visible_ids()).await?;
        let brands = self.repo.list_active_brands().await?;
        let offers = self.repo.list_active_offers().await?;

        Ok(CatalogSnapshot {
            tree,
            products,
            brands,
            offers,
        })
    }

    async fn generate(&self) -> Result<String> {
        let snapshot = self.load_snapshot().await.map_err(|e| {
            tracing::error!("Sitemap generation failed: {}", e);
            e
        })?;

        let xml = SitemapBuilder::new(&self.base_url, Utc::now()).render(&snapshot);
        tracing::info!(
            "Sitemap generated: categories={}, products={}, brands={}, offers={}",
            snapshot.tree.visible_ids().len(),
            snapshot.products.len(),
            snapshot.brands.len(),
            snapshot.offers.len()
        );
        Ok(xml)
    }

    fn is_fresh(&self, cached: &CachedSitemap) -> bool {
        cached.built_at.elapsed() < self.cache_ttl
    }

    pub async fn sitemap(&self) -> Result<Arc<String>> {
        if self.cache_ttl.is_zero() {
            return self.generate().await.map(Arc::new);
        }

        if let Some(cached) = self.cache.read().await.as_ref() {
            if self.is_fresh(cached) {
                return Ok(Arc::clone(&cached.xml));
            }
        }

        let mut cache = self.cache.write().await;
        // another request may have refreshed it while we waited
        if let Some(cached) = cache.as_ref() {
            if self.is_fresh(cached) {
                return Ok(Arc::clone(&cached.xml));
            }
        }

        let xml = Arc::new(self.generate().await?);
        *cache = Some(CachedSitemap {
            xml: Arc::clone(&xml),
            built_at: Instant::now(),
        });
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{category, product, InMemoryCatalogRepository};

    fn repo() -> InMemoryCatalogRepository {
        InMemoryCatalogRepository::default()
            .with_categories(vec![category(1, None, "Kitchen", true)])
            .with_products(vec![product(1, 1, "toaster", true)])
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let service = SitemapService::new(
            Arc::new(repo().failing()),
            "https://shop.example".to_string(),
            Duration::ZERO,
        );

        assert!(matches!(
            service.sitemap().await,
            Err(AppError::QueryFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_cached_document_is_reused_within_ttl() {
        let repo = Arc::new(repo());
        let service = SitemapService::new(
            repo.clone(),
            "https://shop.example".to_string(),
            Duration::from_secs(300),
        );

        let first = service.sitemap().await.unwrap();
        repo.push_product(product(2, 1, "kettle", true));
        let second = service.sitemap().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!second.contains("kettle"));
    }

    #[tokio::test]
    async fn test_zero_ttl_regenerates() {
        let repo = Arc::new(repo());
        let service = SitemapService::new(
            repo.clone(),
            "https://shop.example".to_string(),
            Duration::ZERO,
        );

        let first = service.sitemap().await.unwrap();
        repo.push_product(product(2, 1, "kettle", true));
        let second = service.sitemap().await.unwrap();

        assert!(first.contains("/product/toaster"));
        assert!(!first.contains("kettle"));
        assert!(second.contains("/product/kettle"));
    }
}
