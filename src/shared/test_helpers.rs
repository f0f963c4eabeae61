//! Fixtures and in-memory stand-ins shared by the unit tests.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AdminAccount, Principal};
use crate::features::auth::AdminDirectory;
use crate::features::catalog::dtos::{BrandInput, CategoryInput, OfferInput, ProductInput};
use crate::features::catalog::models::{Brand, CatalogEntity, Category, Offer, Product};
use crate::features::catalog::repository::CatalogRepository;

// =============================================================================
// FIXTURES
// =============================================================================

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap()
}

/// Category whose slug is the lowercased name with spaces as hyphens
pub fn category(id: i64, parent_id: Option<i64>, name: &str, active: bool) -> Category {
    Category {
        id,
        parent_id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        display_order: 0,
        is_active: active,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn product(id: i64, category_id: i64, slug: &str, active: bool) -> Product {
    Product {
        id,
        category_id,
        brand_id: None,
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: None,
        price: Decimal::new(4999, 2),
        image_urls: Vec::new(),
        is_active: active,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn brand(id: i64, slug: &str, active: bool) -> Brand {
    Brand {
        id,
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        logo_url: None,
        is_active: active,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// Offer without a validity window and without products
pub fn offer(id: i64, active: bool) -> Offer {
    Offer {
        id,
        title: format!("Offer {}", id),
        slug: format!("offer-{}", id),
        description: None,
        product_ids: Vec::new(),
        starts_at: None,
        ends_at: None,
        is_active: active,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

// =============================================================================
// LOG CAPTURE
// =============================================================================

/// Formatted log output collected by [`capture_logs`]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.0))
    }
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines_containing(needle).len()
    }
}

/// Routes every event on the current thread into a buffer until the guard drops
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

// =============================================================================
// AUTH
// =============================================================================

/// Wraps `router` so every request carries `principal`, as `auth_middleware` would
pub fn with_principal(router: Router, principal: Option<Principal>) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let principal = principal.clone();
            async move {
                if let Some(principal) = principal {
                    request.extensions_mut().insert(principal);
                }
                next.run(request).await
            }
        },
    ))
}

#[derive(Default)]
pub struct InMemoryAdminDirectory {
    admins: HashMap<i64, AdminAccount>,
}

impl InMemoryAdminDirectory {
    pub fn with_admin(mut self, id: i64, active: bool) -> Self {
        self.admins.insert(
            id,
            AdminAccount {
                id,
                name: format!("Admin {}", id),
                email: format!("admin{}@shop.example", id),
                is_active: active,
            },
        );
        self
    }
}

#[async_trait]
impl AdminDirectory for InMemoryAdminDirectory {
    async fn find_admin(&self, id: i64) -> Result<Option<AdminAccount>> {
        Ok(self.admins.get(&id).cloned())
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Default)]
struct CatalogRows {
    categories: Vec<Category>,
    products: Vec<Product>,
    brands: Vec<Brand>,
    offers: Vec<Offer>,
}

impl CatalogRows {
    fn next_id(&self) -> i64 {
        let max = [
            self.categories.iter().map(|c| c.id).max(),
            self.products.iter().map(|p| p.id).max(),
            self.brands.iter().map(|b| b.id).max(),
            self.offers.iter().map(|o| o.id).max(),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);
        max + 1
    }
}

/// Catalog store over plain vectors, mirroring the filters of the SQL implementation
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    rows: Mutex<CatalogRows>,
    failing: bool,
}

fn conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("Slug '{}' is already in use", slug))
}

impl InMemoryCatalogRepository {
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.rows.lock().unwrap().categories = categories;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.rows.lock().unwrap().products = products;
        self
    }

    pub fn with_brands(self, brands: Vec<Brand>) -> Self {
        self.rows.lock().unwrap().brands = brands;
        self
    }

    pub fn with_offers(self, offers: Vec<Offer>) -> Self {
        self.rows.lock().unwrap().offers = offers;
        self
    }

    /// Every call fails like a lost database connection
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn push_product(&self, product: Product) {
        self.rows.lock().unwrap().products.push(product);
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(AppError::QueryFailed(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn visible_products(&self, category_ids: &[i64]) -> Vec<Product> {
        let rows = self.rows.lock().unwrap();
        let mut products: Vec<Product> = rows
            .products
            .iter()
            .filter(|p| p.is_active && category_ids.contains(&p.category_id))
            .filter(|p| {
                rows.categories
                    .iter()
                    .any(|c| c.id == p.category_id && c.is_active)
            })
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().categories.clone())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_active_products(
        &self,
        category_ids: &[i64],
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64)> {
        self.check()?;
        let products = self.visible_products(category_ids);
        let total = products.len() as i64;
        let page = products
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn active_products_in(&self, category_ids: &[i64]) -> Result<Vec<Product>> {
        self.check()?;
        Ok(self.visible_products(category_ids))
    }

    async fn find_active_product(&self, slug: &str) -> Result<Option<Product>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .products
            .iter()
            .find(|p| p.slug == slug && p.is_active)
            .cloned())
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_active_brands(&self) -> Result<Vec<Brand>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let mut brands: Vec<Brand> = rows.brands.iter().filter(|b| b.is_active).cloned().collect();
        brands.sort_by_key(|b| b.id);
        Ok(brands)
    }

    async fn find_brand(&self, id: i64) -> Result<Option<Brand>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.brands.iter().find(|b| b.id == id).cloned())
    }

    async fn list_active_offers(&self) -> Result<Vec<Offer>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let mut offers: Vec<Offer> = rows.offers.iter().filter(|o| o.is_active).cloned().collect();
        offers.sort_by_key(|o| o.id);
        Ok(offers)
    }

    async fn count_active(&self, entity: CatalogEntity) -> Result<i64> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let count = match entity {
            CatalogEntity::Category => rows.categories.iter().filter(|c| c.is_active).count(),
            CatalogEntity::Product => rows.products.iter().filter(|p| p.is_active).count(),
            CatalogEntity::Brand => rows.brands.iter().filter(|b| b.is_active).count(),
            CatalogEntity::Offer => rows.offers.iter().filter(|o| o.is_active).count(),
        };
        Ok(count as i64)
    }

    async fn create_category(&self, input: &CategoryInput) -> Result<Category> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.categories.iter().any(|c| c.slug == input.slug) {
            return Err(conflict(&input.slug));
        }
        let mut created = category(rows.next_id(), input.parent_id, &input.name, input.is_active.is_active());
        created.slug = input.slug.clone();
        created.description = input.description.clone();
        created.display_order = input.display_order;
        rows.categories.push(created.clone());
        Ok(created)
    }

    async fn update_category(&self, id: i64, input: &CategoryInput) -> Result<Option<Category>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.categories.iter().any(|c| c.slug == input.slug && c.id != id) {
            return Err(conflict(&input.slug));
        }
        Ok(rows.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.parent_id = input.parent_id;
            c.name = input.name.clone();
            c.slug = input.slug.clone();
            c.description = input.description.clone();
            c.display_order = input.display_order;
            c.is_active = input.is_active.is_active();
            c.clone()
        }))
    }

    async fn create_brand(&self, input: &BrandInput) -> Result<Brand> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.brands.iter().any(|b| b.slug == input.slug) {
            return Err(conflict(&input.slug));
        }
        let mut created = brand(rows.next_id(), &input.slug, input.is_active.is_active());
        created.name = input.name.clone();
        created.logo_url = input.logo_url.clone();
        rows.brands.push(created.clone());
        Ok(created)
    }

    async fn update_brand(&self, id: i64, input: &BrandInput) -> Result<Option<Brand>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.brands.iter().any(|b| b.slug == input.slug && b.id != id) {
            return Err(conflict(&input.slug));
        }
        Ok(rows.brands.iter_mut().find(|b| b.id == id).map(|b| {
            b.name = input.name.clone();
            b.slug = input.slug.clone();
            b.logo_url = input.logo_url.clone();
            b.is_active = input.is_active.is_active();
            b.clone()
        }))
    }

    async fn create_product(&self, input: &ProductInput) -> Result<Product> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.products.iter().any(|p| p.slug == input.slug) {
            return Err(conflict(&input.slug));
        }
        let mut created = product(
            rows.next_id(),
            input.category_id,
            &input.slug,
            input.is_active.is_active(),
        );
        created.brand_id = input.brand_id;
        created.name = input.name.clone();
        created.description = input.description.clone();
        created.price = input.price;
        created.image_urls = input.image_urls.clone();
        rows.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<Option<Product>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.products.iter().any(|p| p.slug == input.slug && p.id != id) {
            return Err(conflict(&input.slug));
        }
        Ok(rows.products.iter_mut().find(|p| p.id == id).map(|p| {
            p.category_id = input.category_id;
            p.brand_id = input.brand_id;
            p.name = input.name.clone();
            p.slug = input.slug.clone();
            p.description = input.description.clone();
            p.price = input.price;
            p.image_urls = input.image_urls.clone();
            p.is_active = input.is_active.is_active();
            p.clone()
        }))
    }

    async fn create_offer(&self, input: &OfferInput) -> Result<Offer> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.offers.iter().any(|o| o.slug == input.slug) {
            return Err(conflict(&input.slug));
        }
        let mut created = offer(rows.next_id(), input.is_active.is_active());
        created.title = input.title.clone();
        created.slug = input.slug.clone();
        created.description = input.description.clone();
        created.product_ids = input.normalized_product_ids();
        created.starts_at = input.starts_at;
        created.ends_at = input.ends_at;
        rows.offers.push(created.clone());
        Ok(created)
    }

    async fn update_offer(&self, id: i64, input: &OfferInput) -> Result<Option<Offer>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.offers.iter().any(|o| o.slug == input.slug && o.id != id) {
            return Err(conflict(&input.slug));
        }
        Ok(rows.offers.iter_mut().find(|o| o.id == id).map(|o| {
            o.title = input.title.clone();
            o.slug = input.slug.clone();
            o.description = input.description.clone();
            o.product_ids = input.normalized_product_ids();
            o.starts_at = input.starts_at;
            o.ends_at = input.ends_at;
            o.is_active = input.is_active.is_active();
            o.clone()
        }))
    }
}
