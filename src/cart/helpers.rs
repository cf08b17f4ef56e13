//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for promo codes and cart summaries.

use super::models::CartLineView;
use crate::config::PricingConfig;
use tracing::warn;

/// Resolves a promo code to its flat discount. Unknown or empty codes give 0.
///
/// Codes are matched case-insensitively after trimming.
pub fn promo_discount(pricing: &PricingConfig, code: Option<&str>) -> i64 {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return 0;
    };

    let found = pricing
        .promo_codes
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, amount)| *amount);

    match found {
        Some(amount) => i64::try_from(amount).unwrap_or(i64::MAX),
        None => {
            warn!(code, "Unknown promo code");
            0
        }
    }
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Tivi LED 50 inch, 1x Loa Bluetooth Mini"`.
pub fn format_item_summary(lines: &[CartLineView]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.product.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
