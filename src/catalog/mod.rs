//! Catalog Domain Module
//!
//! This module contains the read-only side of the storefront:
//! - Domain models (products, services, categories, filter queries)
//! - The entity store and its seed loading
//! - The catalog filter
//! - Presentation helpers and REST API handlers

pub mod filter;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod seed;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Category, FilterQuery, PriceRange, Product, Service, Subcategory};
pub use store::{Catalog, SharedCatalog};
