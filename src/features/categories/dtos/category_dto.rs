use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::aliases::storefront_path;
use crate::features::categories::models::Category;
use crate::features::categories::tree::CategoryTree;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub display_order: i32,
    /// Storefront path (alias when one exists)
    pub path: String,
}

impl From<&Category> for CategoryResponseDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name.clone(),
            slug: c.slug.clone(),
            description: c.description.clone(),
            display_order: c.display_order,
            path: storefront_path(&c.slug),
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub path: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Nested view of the visible part of the taxonomy
    pub fn build_tree(tree: &CategoryTree) -> Vec<CategoryTreeDto> {
        tree.visible_roots()
            .into_iter()
            .map(|root| Self::build_node(root, tree))
            .collect()
    }

    fn build_node(category: &Category, tree: &CategoryTree) -> CategoryTreeDto {
        let children = tree
            .visible_children(category.id)
            .into_iter()
            .map(|child| Self::build_node(child, tree))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            display_order: category.display_order,
            path: storefront_path(&category.slug),
            children,
        }
    }
}

/// A resolved storefront key: the category plus the ids its listing covers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolvedCategoryDto {
    pub category: CategoryResponseDto,
    /// Alias path the key matched, if it was an alias
    pub alias: Option<String>,
    /// The category and all visible descendants, breadth first
    pub descendant_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::category;

    #[test]
    fn test_tree_skips_hidden_branches() {
        let tree = CategoryTree::build(vec![
            category(1, None, "Appliances", true),
            category(2, Some(1), "Kitchen", true),
            category(3, Some(1), "Laundry", false),
            category(4, Some(3), "Dryers", true),
        ]);

        let nodes = CategoryTreeDto::build_tree(&tree);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].slug, "kitchen");
        assert!(nodes[0].children[0].children.is_empty());
    }

    #[test]
    fn test_alias_target_carries_alias_path() {
        let mut kitchen = category(7, None, "Kitchen", true);
        kitchen.slug = "kitchen-appliances".to_string();

        let dto = CategoryResponseDto::from(&kitchen);
        assert_eq!(dto.path, "/kitchen");
    }
}
