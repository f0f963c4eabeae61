//! Fixed storefront aliases.
//!
//! The storefront navigation links to eight short paths. Each one resolves to a
//! canonical category slug through this table and nowhere else. Renaming a category
//! slug means updating the table, and the tests below pin the alias paths themselves.

/// A storefront path bound to a canonical category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAlias {
    /// Storefront path, always with a leading slash
    pub path: &'static str,
    /// Slug of the category the alias opens
    pub category_slug: &'static str,
}

pub const CATEGORY_ALIASES: [CategoryAlias; 8] = [
    CategoryAlias {
        path: "/kitchen",
        category_slug: "kitchen-appliances",
    },
    CategoryAlias {
        path: "/cooling",
        category_slug: "air-conditioning-cooling",
    },
    CategoryAlias {
        path: "/small-appliances",
        category_slug: "small-home-appliances",
    },
    CategoryAlias {
        path: "/washing",
        category_slug: "washing-machines-dryers",
    },
    CategoryAlias {
        path: "/cleaning",
        category_slug: "vacuum-cleaners-cleaning",
    },
    CategoryAlias {
        path: "/electronics",
        category_slug: "tv-audio-electronics",
    },
    CategoryAlias {
        path: "/lighting",
        category_slug: "lighting",
    },
    CategoryAlias {
        path: "/tools",
        category_slug: "power-hand-tools",
    },
];

/// Looks up an alias by path. The leading slash is optional.
pub fn find_by_path(path: &str) -> Option<&'static CategoryAlias> {
    let trimmed = path.trim().trim_end_matches('/');
    let normalized = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if normalized.is_empty() {
        return None;
    }
    CATEGORY_ALIASES
        .iter()
        .find(|alias| &alias.path[1..] == normalized)
}

/// Alias pointing at the given category slug, if any
pub fn find_by_slug(slug: &str) -> Option<&'static CategoryAlias> {
    CATEGORY_ALIASES
        .iter()
        .find(|alias| alias.category_slug == slug)
}

/// Storefront path of a category: its alias when it has one, `/category/{slug}` otherwise
pub fn storefront_path(slug: &str) -> String {
    match find_by_slug(slug) {
        Some(alias) => alias.path.to_string(),
        None => format!("/category/{}", slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::SLUG_REGEX;
    use std::collections::HashSet;

    #[test]
    fn test_alias_paths_are_pinned() {
        let paths: Vec<&str> = CATEGORY_ALIASES.iter().map(|a| a.path).collect();
        assert_eq!(
            paths,
            vec![
                "/kitchen",
                "/cooling",
                "/small-appliances",
                "/washing",
                "/cleaning",
                "/electronics",
                "/lighting",
                "/tools",
            ]
        );
    }

    #[test]
    fn test_every_alias_maps_to_a_valid_unique_slug() {
        let mut seen = HashSet::new();
        for alias in CATEGORY_ALIASES.iter() {
            assert!(SLUG_REGEX.is_match(alias.category_slug), "{:?}", alias);
            assert!(seen.insert(alias.category_slug), "duplicate target {:?}", alias);
        }
    }

    #[test]
    fn test_find_by_path_accepts_optional_slash() {
        assert_eq!(
            find_by_path("/kitchen").map(|a| a.category_slug),
            Some("kitchen-appliances")
        );
        assert_eq!(
            find_by_path("kitchen").map(|a| a.category_slug),
            Some("kitchen-appliances")
        );
        assert_eq!(
            find_by_path("/tools/").map(|a| a.category_slug),
            Some("power-hand-tools")
        );
        assert!(find_by_path("/garden").is_none());
        assert!(find_by_path("/").is_none());
        assert!(find_by_path("").is_none());
    }

    #[test]
    fn test_find_by_slug_round_trips_every_alias() {
        for alias in CATEGORY_ALIASES.iter() {
            assert_eq!(find_by_slug(alias.category_slug), Some(alias));
            assert_eq!(find_by_path(alias.path), Some(alias));
        }
    }

    #[test]
    fn test_storefront_path_prefers_alias() {
        assert_eq!(storefront_path("kitchen-appliances"), "/kitchen");
        assert_eq!(storefront_path("garden-furniture"), "/category/garden-furniture");
    }
}
