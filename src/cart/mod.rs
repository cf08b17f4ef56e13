//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (line items, shipping policy, totals, request bodies)
//! - The cart ledger and its invariants
//! - Promo code and summary helpers
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod ledger;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use ledger::CartLedger;
pub use models::{CartLineItem, CartTotals, ShippingPolicy};
