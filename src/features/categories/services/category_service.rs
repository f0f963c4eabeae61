use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::ProductResponseDto;
use crate::features::catalog::services::CatalogService;
use crate::features::categories::aliases::{self, CategoryAlias};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, ResolvedCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::tree::CategoryTree;
use crate::shared::types::PaginationQuery;

/// Outcome of resolving a storefront key against a taxonomy snapshot
#[derive(Debug)]
pub struct Resolution<'a> {
    pub category: &'a Category,
    pub alias: Option<&'static CategoryAlias>,
    pub descendant_ids: Vec<i64>,
}

/// Resolves an alias path, numeric id or slug, in that order.
///
/// A key that matches an alias never falls back to id or slug lookup, and a target that
/// is missing or hidden is reported as not found.
pub fn resolve<'a>(tree: &'a CategoryTree, key: &str) -> Result<Resolution<'a>> {
    let key = key.trim();
    let not_found = || AppError::NotFound(format!("Category '{}' not found", key));

    let (category, alias) = if let Some(alias) = aliases::find_by_path(key) {
        let target = tree.find_by_slug(alias.category_slug);
        if target.is_none() {
            tracing::warn!(
                "Alias {} points at missing category '{}'",
                alias.path,
                alias.category_slug
            );
        }
        (target, Some(alias))
    } else if let Some(by_id) = key.parse::<i64>().ok().and_then(|id| tree.get(id)) {
        (Some(by_id), None)
    } else {
        (tree.find_by_slug(key), None)
    };

    let category = category
        .filter(|c| tree.is_visible(c.id))
        .ok_or_else(not_found)?;

    Ok(Resolution {
        category,
        alias,
        descendant_ids: tree.visible_descendants(category.id),
    })
}

/// Service for taxonomy reads
pub struct CategoryService {
    catalog: Arc<CatalogService>,
}

impl CategoryService {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    /// Visible categories (flat list, roots first)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let tree = self.catalog.taxonomy().await?;
        Ok(tree.visible().map(CategoryResponseDto::from).collect())
    }

    /// Visible categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let tree = self.catalog.taxonomy().await?;
        Ok(CategoryTreeDto::build_tree(&tree))
    }

    pub async fn get(&self, key: &str) -> Result<ResolvedCategoryDto> {
        let tree = self.catalog.taxonomy().await?;
        let resolution = resolve(&tree, key)?;

        Ok(ResolvedCategoryDto {
            category: CategoryResponseDto::from(resolution.category),
            alias: resolution.alias.map(|a| a.path.to_string()),
            descendant_ids: resolution.descendant_ids,
        })
    }

    /// Active products of the resolved category and its visible descendants
    pub async fn products(
        &self,
        key: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let tree = self.catalog.taxonomy().await?;
        let resolution = resolve(&tree, key)?;
        self.catalog
            .products_in(&resolution.descendant_ids, pagination)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::aliases::CATEGORY_ALIASES;
    use crate::shared::test_helpers::{category, product, InMemoryCatalogRepository};

    fn slugged(id: i64, parent: Option<i64>, slug: &str, active: bool) -> Category {
        let mut c = category(id, parent, slug, active);
        c.slug = slug.to_string();
        c
    }

    /// One root per alias target plus a few extra nodes
    fn storefront_categories() -> Vec<Category> {
        let mut categories: Vec<Category> = CATEGORY_ALIASES
            .iter()
            .enumerate()
            .map(|(i, alias)| slugged(i as i64 + 1, None, alias.category_slug, true))
            .collect();
        categories.push(slugged(20, Some(1), "ovens", true));
        categories.push(slugged(21, Some(20), "steam-ovens", true));
        categories.push(slugged(22, Some(1), "dishwashers", false));
        categories.push(slugged(23, None, "garden", true));
        categories
    }

    #[test]
    fn test_every_alias_resolves_to_its_category() {
        let tree = CategoryTree::build(storefront_categories());

        for alias in CATEGORY_ALIASES.iter() {
            let resolution = resolve(&tree, alias.path).unwrap();
            assert_eq!(resolution.category.slug, alias.category_slug);
            assert_eq!(resolution.alias, Some(alias));
            assert_eq!(resolution.descendant_ids[0], resolution.category.id);
        }
    }

    #[test]
    fn test_alias_covers_visible_descendants_only() {
        let tree = CategoryTree::build(storefront_categories());

        let resolution = resolve(&tree, "/kitchen").unwrap();
        assert_eq!(resolution.descendant_ids, vec![1, 20, 21]);
    }

    #[test]
    fn test_id_and_slug_keys() {
        let tree = CategoryTree::build(storefront_categories());

        assert_eq!(resolve(&tree, "23").unwrap().category.slug, "garden");
        assert_eq!(resolve(&tree, "garden").unwrap().category.id, 23);
        assert!(resolve(&tree, "garden").unwrap().alias.is_none());
    }

    #[test]
    fn test_hidden_targets_are_not_found() {
        let mut categories = storefront_categories();
        // deactivate the /cooling target
        categories[1].is_active = false;
        let tree = CategoryTree::build(categories);

        assert!(matches!(
            resolve(&tree, "/cooling"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            resolve(&tree, "dishwashers"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(resolve(&tree, "nope"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_alias_with_missing_target_does_not_fall_back() {
        // a slug equal to the alias name must not be picked up instead
        let tree = CategoryTree::build(vec![slugged(1, None, "tools", true)]);

        assert!(matches!(resolve(&tree, "tools"), Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_products_by_alias_include_descendants() {
        let repo = InMemoryCatalogRepository::default()
            .with_categories(storefront_categories())
            .with_products(vec![
                product(1, 1, "microwave", true),
                product(2, 21, "combi-steamer", true),
                product(3, 22, "dishwasher", true),
                product(4, 23, "hose", true),
            ]);
        let service = CategoryService::new(Arc::new(CatalogService::new(Arc::new(repo))));

        let (products, total) = service
            .products("kitchen", &PaginationQuery::default())
            .await
            .unwrap();

        let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["microwave", "combi-steamer"]);
        assert_eq!(total, 2);
    }
}
