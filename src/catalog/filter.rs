//! Catalog Filter
//!
//! Pure matching of a [`FilterQuery`] over a product slice. Results keep the
//! slice order; slicing into pages is left to the caller.

use super::models::{FilterQuery, Product};
use crate::error::StoreResult;

/// Returns every product satisfying all predicates of `query`, in input order.
///
/// Fails with `InvalidRange` when the price bounds are inverted.
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &FilterQuery,
) -> StoreResult<Vec<&'a Product>> {
    query.price_range.validate()?;

    let needle = query.search.to_lowercase();

    Ok(products
        .iter()
        .filter(|p| matches(p, query, &needle))
        .collect())
}

/// `needle` must already be lowercased.
fn matches(product: &Product, query: &FilterQuery, needle: &str) -> bool {
    if let Some(category) = query.category {
        if product.category != category {
            return false;
        }
    }

    if let Some(subcategory) = query.subcategory {
        if product.subcategory != Some(subcategory) {
            return false;
        }
    }

    if !needle.is_empty() && !product.name.to_lowercase().contains(needle) {
        return false;
    }

    if !query.price_range.contains(product.price) {
        return false;
    }

    query.brands.is_empty() || query.brands.iter().any(|b| *b == product.brand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Category, Subcategory};
    use crate::error::StoreError;

    fn product(id: &str, name: &str, price: u64, category: Category, brand: &str) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            rating: 4.0,
            image: String::new(),
            discount: None,
            is_new: false,
            category,
            subcategory: None,
            brand: brand.into(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("A", "Loa Bluetooth", 1_799_000, Category::Speakers, "Sony"),
            product("B", "Tivi 4K", 11_990_000, Category::Tvs, "Samsung"),
            product("C", "Quạt Mini", 5, Category::Fans, "Xiaomi"),
            product("D", "Quạt Lớn", 6, Category::Fans, "Panasonic"),
        ]
    }

    fn ids(found: &[&Product]) -> Vec<String> {
        found.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_category_scenario() {
        let products = sample();
        let found = filter_products(&products, &FilterQuery::new().category(Category::Speakers))
            .unwrap();
        assert_eq!(ids(&found), vec!["A"]);
    }

    #[test]
    fn test_exact_price_boundary() {
        let products = sample();
        let found = filter_products(&products, &FilterQuery::new().price_range(5, 5)).unwrap();
        assert_eq!(ids(&found), vec!["C"]);
    }

    #[test]
    fn test_inverted_range() {
        let products = sample();
        let err = filter_products(&products, &FilterQuery::new().price_range(10, 1)).unwrap_err();
        assert_eq!(err, StoreError::InvalidRange { min: 10, max: 1 });
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = sample();
        let found = filter_products(&products, &FilterQuery::new().search("QUẠT")).unwrap();
        assert_eq!(ids(&found), vec!["C", "D"]);

        let found = filter_products(&products, &FilterQuery::new().search("")).unwrap();
        assert_eq!(found.len(), products.len());
    }

    #[test]
    fn test_empty_brand_set_is_unrestricted() {
        let products = sample();
        let all = filter_products(&products, &FilterQuery::new()).unwrap();
        assert_eq!(all.len(), 4);

        let query = FilterQuery::new().brand("Sony").brand("Xiaomi");
        assert_eq!(ids(&filter_products(&products, &query).unwrap()), vec!["A", "C"]);
    }

    #[test]
    fn test_subcategory_requires_exact_match() {
        let mut products = sample();
        products[2].subcategory = Some(Subcategory::Table);
        let query = FilterQuery::new()
            .category(Category::Fans)
            .subcategory(Subcategory::Table);
        assert_eq!(ids(&filter_products(&products, &query).unwrap()), vec!["C"]);
    }

    #[test]
    fn test_results_satisfy_every_predicate() {
        let products = sample();
        let query = FilterQuery::new()
            .category(Category::Fans)
            .search("quạt")
            .price_range(0, 5)
            .brand("Xiaomi");
        let found = filter_products(&products, &query).unwrap();
        for p in &found {
            assert_eq!(p.category, Category::Fans);
            assert!(p.name.to_lowercase().contains("quạt"));
            assert!(p.price <= 5);
            assert_eq!(p.brand, "Xiaomi");
        }
        assert_eq!(found.len(), 1);

        // Same query, same answer
        assert_eq!(found, filter_products(&products, &query).unwrap());
    }
}
