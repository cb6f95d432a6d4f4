//! Memoized category-by-id lookups
//!
//! Walking a persisted label back up its hierarchy asks for the same parents
//! over and over; answers are kept for the life of the wrapper. Failures are
//! never cached.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use loom_engine::{CategoryCatalog, LookupResult};
use parking_lot::RwLock;
use shared::models::CategoryNode;

pub struct CachedCategoryLookup<C> {
    inner: C,
    nodes: Arc<RwLock<HashMap<String, CategoryNode>>>,
    seed_from_listing: bool,
}

impl<C: CategoryCatalog> CachedCategoryLookup<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            nodes: Arc::new(RwLock::new(HashMap::new())),
            seed_from_listing: false,
        }
    }

    /// Also remember every node of each full catalog listing
    pub fn seeded_from_listing(mut self) -> Self {
        self.seed_from_listing = true;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Number of cached nodes
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    pub fn clear(&self) {
        self.nodes.write().clear();
    }

    fn remember(&self, roots: &[CategoryNode]) {
        let mut nodes = self.nodes.write();
        let mut stack: Vec<&CategoryNode> = roots.iter().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.child.iter());
            nodes.insert(node.id.clone(), node.clone());
        }
    }
}

#[async_trait]
impl<C: CategoryCatalog> CategoryCatalog for CachedCategoryLookup<C> {
    async fn fetch_categories(&self) -> LookupResult<Vec<CategoryNode>> {
        let roots = self.inner.fetch_categories().await?;
        if self.seed_from_listing {
            self.remember(&roots);
        }
        Ok(roots)
    }

    async fn fetch_category(&self, id: &str) -> LookupResult<CategoryNode> {
        let cached = self.nodes.read().get(id).cloned();
        if let Some(node) = cached {
            tracing::trace!(id, "Category cache hit");
            return Ok(node);
        }

        let node = self.inner.fetch_category(id).await?;
        self.nodes.write().insert(id.to_string(), node.clone());
        Ok(node)
    }
}

impl<C> std::fmt::Debug for CachedCategoryLookup<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCategoryLookup")
            .field("cached", &self.nodes.read().len())
            .field("seed_from_listing", &self.seed_from_listing)
            .finish()
    }
}
