//! Entity Store
//!
//! Read-only product and service collections, seeded once at startup and
//! shared behind an `Arc` by every session.

use super::filter::filter_products;
use super::models::{Category, FilterQuery, Product, Service, ServiceCategory};
use super::seed::SeedData;
use crate::error::{StoreError, StoreResult};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Catalog shared between threads
pub type SharedCatalog = Arc<Catalog>;

/// Number of related products shown on a product page
pub const RELATED_LIMIT: usize = 4;

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    services: Vec<Service>,
}

impl Catalog {
    /// Builds a catalog after validating every record.
    pub fn new(products: Vec<Product>, services: Vec<Service>) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.as_str()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for service in &services {
            if !seen.insert(service.id.as_str()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate service id: {}",
                    service.id
                )));
            }
        }

        Ok(Self { products, services })
    }

    /// Catalog built from the dataset compiled into the binary.
    pub fn embedded() -> StoreResult<Self> {
        Self::from_seed(SeedData::embedded()?)
    }

    /// Catalog built from a JSON seed file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_seed(SeedData::from_file(path)?)
    }

    fn from_seed(seed: SeedData) -> StoreResult<Self> {
        let catalog = Self::new(seed.products, seed.services)?;
        info!(
            products = catalog.products.len(),
            services = catalog.services.len(),
            "Catalog seeded"
        );
        Ok(catalog)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// All products in insertion order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn find_product(&self, id: &str) -> StoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Brand labels used by products in `category`, sorted.
    ///
    /// Computed on every call; the dataset is small.
    pub fn distinct_brands(&self, category: Category) -> BTreeSet<String> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.brand.clone())
            .collect()
    }

    pub fn filter(&self, query: &FilterQuery) -> StoreResult<Vec<&Product>> {
        filter_products(&self.products, query)
    }

    /// Other products in the same category as `id`, at most `limit`.
    pub fn related_products(&self, id: &str, limit: usize) -> StoreResult<Vec<&Product>> {
        let product = self.find_product(id)?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect())
    }

    // -------------------------------------------------------------------------
    // Services
    // -------------------------------------------------------------------------

    pub fn list_services(&self) -> &[Service] {
        &self.services
    }

    pub fn find_service(&self, id: &str) -> StoreResult<&Service> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn services_by_category(&self, category: ServiceCategory) -> Vec<&Service> {
        self.services
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Subcategory;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_embedded_seed() {
        let catalog = catalog();
        assert_eq!(catalog.list_products().len(), 24);
        assert_eq!(catalog.list_services().len(), 8);
        assert_eq!(catalog.list_products()[0].id, "f1");
    }

    #[test]
    fn test_find_product() {
        let catalog = catalog();
        assert_eq!(catalog.find_product("s1").unwrap().price, 1_799_000);
        assert_eq!(
            catalog.find_product("nope"),
            Err(StoreError::NotFound("nope".into()))
        );
    }

    #[test]
    fn test_distinct_brands() {
        let brands = catalog().distinct_brands(Category::Fans);
        let brands: Vec<_> = brands.into_iter().collect();
        assert_eq!(brands, vec!["Mitsubishi", "Panasonic", "Xiaomi"]);
    }

    #[test]
    fn test_filter_is_subset_in_store_order() {
        let catalog = catalog();
        let found = catalog
            .filter(&FilterQuery::new().category(Category::Cookers).brand("Philips"))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3", "c5"]);

        let found = catalog
            .filter(&FilterQuery::new().subcategory(Subcategory::Oled))
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_related_products() {
        let catalog = catalog();
        let related = catalog.related_products("t1", RELATED_LIMIT).unwrap();
        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t4", "t5"]);
        assert!(catalog.related_products("zzz", 4).is_err());
    }

    #[test]
    fn test_services_by_category() {
        let catalog = catalog();
        let fans = catalog.services_by_category(ServiceCategory::Fan);
        assert_eq!(fans.len(), 2);
        assert_eq!(catalog.find_service("1").unwrap().link_url, "/services/tv-repair");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = catalog();
        let mut products = catalog.list_products().to_vec();
        products.push(products[0].clone());
        let err = Catalog::new(products, Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidSeed(_)));
    }
}
