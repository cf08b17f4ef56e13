//! REST API handlers for catalog browsing
//!
//! Query strings are turned into a [`FilterQuery`]; matching happens in the
//! store and these handlers only slice and decorate the result.

use super::helpers::{paginate, Page, ProductView, DEFAULT_PER_PAGE};
use super::models::{Category, FilterQuery, PriceRange, Service, ServiceCategory, Subcategory};
use super::store::RELATED_LIMIT;
use crate::error::{StoreError, StoreResult};
use crate::session::SharedState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Creates routes for catalog-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/products/:id/related", get(related_products))
        .route("/categories", get(list_categories))
        .route("/categories/:category/brands", get(category_brands))
        .route("/services", get(list_services))
        .route("/services/:id", get(get_service))
}

/// Query string for GET /products
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// Case-insensitive name search
    pub q: Option<String>,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,

    /// Comma-separated brand labels
    pub brand: Option<String>,

    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ProductsQuery {
    pub fn to_filter(&self) -> FilterQuery {
        let defaults = PriceRange::default();
        FilterQuery {
            search: self.q.clone().unwrap_or_default(),
            price_range: PriceRange {
                min: self.min.unwrap_or(defaults.min),
                max: self.max.unwrap_or(defaults.max),
            },
            category: self.category,
            subcategory: self.subcategory,
            brands: self
                .brand
                .as_deref()
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|b| !b.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Query string for GET /services
#[derive(Debug, Default, Deserialize)]
pub struct ServicesQuery {
    pub category: Option<ServiceCategory>,
}

/// Navigation entry for one category
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub slug: &'static str,
    pub name: &'static str,
    pub subcategories: Vec<SubcategoryView>,
}

#[derive(Debug, Serialize)]
pub struct SubcategoryView {
    pub slug: &'static str,
    pub name: &'static str,
}

/// Endpoint: GET /products
async fn list_products(
    State(state): State<SharedState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> StoreResult<Json<Page<ProductView>>> {
    let Query(query) = query?;
    let found = state.catalog.filter(&query.to_filter())?;
    let views: Vec<ProductView> = found.into_iter().map(ProductView::from).collect();

    Ok(Json(paginate(
        &views,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )))
}

/// Endpoint: GET /products/{id}
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> StoreResult<Json<ProductView>> {
    let product = state.catalog.find_product(&id)?;
    Ok(Json(product.into()))
}

/// Endpoint: GET /products/{id}/related
async fn related_products(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> StoreResult<Json<Vec<ProductView>>> {
    let related = state.catalog.related_products(&id, RELATED_LIMIT)?;
    Ok(Json(related.into_iter().map(ProductView::from).collect()))
}

/// Endpoint: GET /categories
async fn list_categories() -> Json<Vec<CategoryView>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|c| CategoryView {
                slug: c.slug(),
                name: c.display_name(),
                subcategories: c
                    .subcategories()
                    .map(|s| SubcategoryView {
                        slug: s.slug(),
                        name: s.display_name(),
                    })
                    .collect(),
            })
            .collect(),
    )
}

/// Endpoint: GET /categories/{category}/brands
async fn category_brands(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> StoreResult<Json<BTreeSet<String>>> {
    let category = Category::from_slug(&slug).ok_or(StoreError::NotFound(slug))?;
    Ok(Json(state.catalog.distinct_brands(category)))
}

/// Endpoint: GET /services
async fn list_services(
    State(state): State<SharedState>,
    query: Result<Query<ServicesQuery>, QueryRejection>,
) -> StoreResult<Json<Vec<Service>>> {
    let Query(query) = query?;
    let services = match query.category {
        Some(category) => state
            .catalog
            .services_by_category(category)
            .into_iter()
            .cloned()
            .collect(),
        None => state.catalog.list_services().to_vec(),
    };
    Ok(Json(services))
}

/// Endpoint: GET /services/{id}
async fn get_service(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> StoreResult<Json<Service>> {
    Ok(Json(state.catalog.find_service(&id)?.clone()))
}
