//! XML sitemap rendering.
//!
//! The builder is pure: it takes a [`CatalogSnapshot`] plus a generation time and
//! produces the document. Given the same snapshot and time the output is byte-for-byte
//! identical, which keeps caches and crawlers happy.

use chrono::{DateTime, Utc};

use crate::features::catalog::models::{Brand, Offer, Product};
use crate::features::categories::aliases::storefront_path;
use crate::features::categories::tree::CategoryTree;

/// Protocol limit for a single sitemap file
pub const MAX_URLS: usize = 50_000;

pub const STATIC_PAGES: [&str; 8] = [
    "/",
    "/about",
    "/contact",
    "/faq",
    "/offers",
    "/brands",
    "/privacy-policy",
    "/terms",
];

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;
const URLSET_CLOSE: &str = "</urlset>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Home,
    Category,
    Offer,
    Brand,
    Product,
    Static,
}

impl ResourceKind {
    pub fn priority(self) -> &'static str {
        match self {
            ResourceKind::Home => "1.0",
            ResourceKind::Category => "0.8",
            ResourceKind::Offer => "0.7",
            ResourceKind::Brand => "0.6",
            ResourceKind::Product => "0.5",
            ResourceKind::Static => "0.3",
        }
    }

    pub fn changefreq(self) -> &'static str {
        match self {
            ResourceKind::Home | ResourceKind::Offer => "daily",
            ResourceKind::Category | ResourceKind::Brand | ResourceKind::Product => "weekly",
            ResourceKind::Static => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub kind: ResourceKind,
}

/// Everything the sitemap is built from, loaded in one go
pub struct CatalogSnapshot {
    pub tree: CategoryTree,
    pub products: Vec<Product>,
    pub brands: Vec<Brand>,
    pub offers: Vec<Offer>,
}

pub struct SitemapBuilder<'a> {
    base_url: &'a str,
    generated_at: DateTime<Utc>,
}

impl<'a> SitemapBuilder<'a> {
    pub fn new(base_url: &'a str, generated_at: DateTime<Utc>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            generated_at,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Entries in document order: static pages, categories, products, brands, offers
    pub fn entries(&self, snapshot: &CatalogSnapshot) -> Vec<SitemapEntry> {
        let tree = &snapshot.tree;

        let mut products: Vec<&Product> = snapshot
            .products
            .iter()
            .filter(|p| p.is_active && tree.is_visible(p.category_id))
            .collect();
        products.sort_by_key(|p| p.id);

        let mut brands: Vec<&Brand> = snapshot.brands.iter().filter(|b| b.is_active).collect();
        brands.sort_by_key(|b| b.id);

        let mut offers: Vec<&Offer> = snapshot
            .offers
            .iter()
            .filter(|o| o.is_live(self.generated_at))
            .collect();
        offers.sort_by_key(|o| o.id);

        let mut dynamic = Vec::new();
        for category in tree.visible() {
            dynamic.push(SitemapEntry {
                loc: self.url(&storefront_path(&category.slug)),
                lastmod: category.updated_at,
                kind: ResourceKind::Category,
            });
        }
        for product in products {
            dynamic.push(SitemapEntry {
                loc: self.url(&format!("/product/{}", product.slug)),
                lastmod: product.updated_at,
                kind: ResourceKind::Product,
            });
        }
        for brand in brands {
            dynamic.push(SitemapEntry {
                loc: self.url(&format!("/brand/{}", brand.slug)),
                lastmod: brand.updated_at,
                kind: ResourceKind::Brand,
            });
        }
        for offer in offers {
            dynamic.push(SitemapEntry {
                loc: self.url(&format!("/offer/{}", offer.slug)),
                lastmod: offer.updated_at,
                kind: ResourceKind::Offer,
            });
        }

        let newest = dynamic
            .iter()
            .map(|e| e.lastmod)
            .max()
            .unwrap_or(self.generated_at);

        let mut entries: Vec<SitemapEntry> = STATIC_PAGES
            .iter()
            .map(|path| SitemapEntry {
                loc: self.url(path),
                lastmod: newest,
                kind: if *path == "/" {
                    ResourceKind::Home
                } else {
                    ResourceKind::Static
                },
            })
            .collect();
        entries.extend(dynamic);
        entries
    }

    pub fn render(&self, snapshot: &CatalogSnapshot) -> String {
        let entries = self.entries(snapshot);
        if entries.len() > MAX_URLS {
            tracing::warn!(
                "Sitemap has {} URLs, above the protocol limit of {}",
                entries.len(),
                MAX_URLS
            );
        }
        render_entries(&entries)
    }
}

pub fn render_entries(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str(URLSET_OPEN);
    xml.push('\n');
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", w3c_datetime(entry.lastmod)));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.kind.changefreq()
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.kind.priority()));
        xml.push_str("  </url>\n");
    }
    xml.push_str(URLSET_CLOSE);
    xml.push('\n');
    xml
}

/// `YYYY-MM-DDThh:mm:ss+00:00`
pub fn w3c_datetime(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}

pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
