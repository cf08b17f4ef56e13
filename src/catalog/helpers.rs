//! Catalog Presentation Helpers
//!
//! Formatting and pagination used by the HTTP layer. Nothing here affects
//! which products match a query.

use super::models::Product;
use serde::Serialize;

/// Default page size for product listings
pub const DEFAULT_PER_PAGE: usize = 12;

/// Formats a minor-unit amount with dot thousands separators and a đ suffix.
///
/// Example output: `"1.799.000đ"`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out.push('đ');
    out
}

/// Product card as rendered by clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub price_label: String,
    pub discount_percent: Option<u8>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            price_label: format_price(product.price),
            discount_percent: product.discount_percent(),
            product: product.clone(),
        }
    }
}

/// One page of a listing plus the size of the full result set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub items: Vec<T>,
}

/// Slices `items` into a 1-based page. Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let start = (page - 1).saturating_mul(per_page);

    Page {
        total: items.len(),
        page,
        per_page,
        items: items.iter().skip(start).take(per_page).cloned().collect(),
    }
}
