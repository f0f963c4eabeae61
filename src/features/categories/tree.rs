//! Category taxonomy held as an arena.
//!
//! Rows are stored once in a `Vec` and addressed by index; parent links stay as ids.
//! Visibility is computed once at build time: a breadth-first walk starts at every
//! active root and only descends into active children. A category is visible exactly
//! when that walk reaches it, so deactivating a category hides its whole branch.
//! Rows with a dangling parent or a cyclic parent chain are never reached and stay
//! hidden.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::features::categories::models::Category;

pub struct CategoryTree {
    nodes: Vec<Category>,
    index: HashMap<i64, usize>,
    slugs: HashMap<String, usize>,
    /// Child indexes per parent id, ordered by (display_order, name, id)
    children: HashMap<i64, Vec<usize>>,
    roots: Vec<usize>,
    /// Visible nodes in breadth-first order, roots first
    visible: Vec<usize>,
    visible_ids: HashSet<i64>,
}

impl CategoryTree {
    pub fn build(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| {
            (a.display_order, &a.name, a.id).cmp(&(b.display_order, &b.name, b.id))
        });

        let index: HashMap<i64, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        let slugs: HashMap<String, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.slug.clone(), i))
            .collect();

        let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            match category.parent_id {
                None => roots.push(i),
                Some(parent_id) => children.entry(parent_id).or_default().push(i),
            }
        }

        let mut tree = Self {
            nodes: categories,
            index,
            slugs,
            children,
            roots,
            visible: Vec::new(),
            visible_ids: HashSet::new(),
        };
        tree.compute_visibility();
        tree.warn_unreachable();
        tree
    }

    fn compute_visibility(&mut self) {
        let mut queue: VecDeque<usize> = self
            .roots
            .iter()
            .copied()
            .filter(|&i| self.nodes[i].is_active)
            .collect();

        while let Some(i) = queue.pop_front() {
            let id = self.nodes[i].id;
            if !self.visible_ids.insert(id) {
                continue;
            }
            self.visible.push(i);
            if let Some(kids) = self.children.get(&id) {
                queue.extend(kids.iter().copied().filter(|&k| self.nodes[k].is_active));
            }
        }
    }

    fn warn_unreachable(&self) {
        let mut reached = HashSet::new();
        let mut queue: VecDeque<usize> = self.roots.iter().copied().collect();
        while let Some(i) = queue.pop_front() {
            let id = self.nodes[i].id;
            if !reached.insert(id) {
                continue;
            }
            if let Some(kids) = self.children.get(&id) {
                queue.extend(kids.iter().copied());
            }
        }

        let unreachable: Vec<i64> = self
            .nodes
            .iter()
            .map(|c| c.id)
            .filter(|id| !reached.contains(id))
            .collect();
        if !unreachable.is_empty() {
            tracing::warn!(
                "Categories with a dangling or cyclic parent chain are hidden: {:?}",
                unreachable
            );
        }
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Category> {
        self.slugs.get(slug).map(|&i| &self.nodes[i])
    }

    /// Active and reachable through active ancestors only
    pub fn is_visible(&self, id: i64) -> bool {
        self.visible_ids.contains(&id)
    }

    /// Visible categories, roots first then level by level
    pub fn visible(&self) -> impl Iterator<Item = &Category> + '_ {
        self.visible.iter().map(move |&i| &self.nodes[i])
    }

    pub fn visible_ids(&self) -> Vec<i64> {
        self.visible().map(|c| c.id).collect()
    }

    pub fn visible_roots(&self) -> Vec<&Category> {
        self.roots
            .iter()
            .map(|&i| &self.nodes[i])
            .filter(|c| self.is_visible(c.id))
            .collect()
    }

    pub fn visible_children(&self, id: i64) -> Vec<&Category> {
        self.children
            .get(&id)
            .map(|kids| {
                kids.iter()
                    .map(|&k| &self.nodes[k])
                    .filter(|c| self.is_visible(c.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `id` followed by all of its visible descendants, breadth first.
    ///
    /// Empty when `id` itself is not visible.
    pub fn visible_descendants(&self, id: i64) -> Vec<i64> {
        if !self.is_visible(id) {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current);
            queue.extend(self.visible_children(current).iter().map(|c| c.id));
        }
        out
    }

    /// Whether moving `node_id` under `new_parent` would break the tree.
    ///
    /// True when the new parent is the node itself, one of its descendants, or sits on
    /// an already cyclic chain.
    pub fn would_create_cycle(&self, node_id: i64, new_parent: Option<i64>) -> bool {
        let mut current = match new_parent {
            None => return false,
            Some(parent) => parent,
        };

        let mut seen = HashSet::new();
        loop {
            if current == node_id || !seen.insert(current) {
                return true;
            }
            match self.get(current).and_then(|c| c.parent_id) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}
