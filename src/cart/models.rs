//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::catalog::helpers::ProductView;
use crate::config::PricingConfig;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart additions
fn default_quantity() -> i64 {
    1
}

/// One (product, quantity) pair. The product is referenced by id only and
/// resolved against the catalog whenever prices are needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,

    /// Always at least 1
    pub quantity: u32,
}

/// Shipping rule: free at or above `free_threshold`, else `flat_fee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    pub free_threshold: u64,
    pub flat_fee: u64,
}

impl ShippingPolicy {
    pub fn fee_for(&self, subtotal: u64) -> u64 {
        if subtotal >= self.free_threshold {
            0
        } else {
            self.flat_fee
        }
    }
}

impl From<&PricingConfig> for ShippingPolicy {
    fn from(pricing: &PricingConfig) -> Self {
        Self {
            free_threshold: pricing.free_shipping_threshold,
            flat_fee: pricing.flat_shipping_fee,
        }
    }
}

/// Derived totals for the current cart contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: u64,
    pub shipping: u64,
    pub discount: u64,
    pub total: u64,

    /// Sum of all quantities
    pub item_count: u64,
}

/// A line item resolved against the catalog, ready for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total: u64,
}

// =============================================================================
// Request / Response Bodies
// =============================================================================

/// Body for POST /cart/items
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Body for PUT /cart/items/{id}
#[derive(Debug, Deserialize)]
pub struct SetQuantityInput {
    pub quantity: i64,
}

/// Query string for GET /cart
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    pub promo_code: Option<String>,
}

/// Full cart state returned by every cart endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub session_id: String,
    pub items: Vec<CartLineView>,
    pub totals: CartTotals,
}
