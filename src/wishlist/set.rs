//! Wishlist Set
//!
//! Product ids a session has marked as favorites, kept in insertion order
//! for stable display. Membership changes are checked against the catalog;
//! listing silently skips ids the catalog no longer knows.

use crate::catalog::models::Product;
use crate::catalog::SharedCatalog;
use crate::error::StoreResult;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct WishlistSet {
    catalog: SharedCatalog,
    ids: Vec<String>,
}

impl WishlistSet {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            ids: Vec::new(),
        }
    }

    /// Adds a product. Already present is a no-op.
    pub fn add(&mut self, product_id: &str) -> StoreResult<()> {
        self.catalog.find_product(product_id)?;
        if !self.contains(product_id) {
            self.ids.push(product_id.to_string());
        }
        Ok(())
    }

    /// Flips membership and returns whether the product is now wishlisted.
    pub fn toggle(&mut self, product_id: &str) -> StoreResult<bool> {
        self.catalog.find_product(product_id)?;

        let now_present = if self.remove(product_id) {
            false
        } else {
            self.ids.push(product_id.to_string());
            true
        };

        debug!(product_id, wishlisted = now_present, "Wishlist toggled");
        Ok(now_present)
    }

    /// Unconditional removal; returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        self.ids.len() != before
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Wishlisted products in insertion order.
    pub fn list(&self) -> Vec<&Product> {
        self.ids
            .iter()
            .filter_map(|id| self.catalog.find_product(id).ok())
            .collect()
    }
}
