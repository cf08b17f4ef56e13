//! Cart Ledger
//!
//! Holds the line items of one cart and derives its totals. The ledger keeps
//! at most one line per product id and never stores a quantity below 1.
//! Prices are always read from the catalog, so a line can never drift from
//! catalog truth.

use super::models::{CartLineItem, CartLineView, CartTotals, ShippingPolicy};
use crate::catalog::SharedCatalog;
use crate::error::{StoreError, StoreResult};
use tracing::debug;

/// Largest subtotal a cart may reach. Mutations that would exceed it fail
/// with `InvalidQuantity`, so every derived amount stays representable.
pub const MAX_SUBTOTAL: u64 = i64::MAX as u64;

#[derive(Debug, Clone)]
pub struct CartLedger {
    catalog: SharedCatalog,
    items: Vec<CartLineItem>,
}

impl CartLedger {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            items: Vec::new(),
        }
    }

    /// Adds `quantity` units of a product, creating the line if needed.
    ///
    /// Returns the resulting quantity of that line.
    pub fn add_or_increment(&mut self, product_id: &str, quantity: i64) -> StoreResult<u32> {
        let delta = positive_quantity(quantity)?;
        self.catalog.find_product(product_id)?;

        let current = self
            .items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity);
        let new_quantity = current
            .checked_add(delta)
            .ok_or(StoreError::InvalidQuantity(quantity))?;
        self.ensure_fits(product_id, new_quantity, quantity)?;

        self.upsert(product_id, new_quantity);
        debug!(product_id, quantity = new_quantity, "Cart line updated");
        Ok(new_quantity)
    }

    /// Sets the absolute quantity of a product's line.
    ///
    /// A quantity below 1 removes the line (no catalog lookup, so stale ids
    /// can always be cleared) and yields `None`. Otherwise the product must
    /// exist; the line is created when absent.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<Option<u32>> {
        if quantity < 1 {
            self.remove(product_id);
            return Ok(None);
        }

        let new_quantity = positive_quantity(quantity)?;
        self.catalog.find_product(product_id)?;
        self.ensure_fits(product_id, new_quantity, quantity)?;

        self.upsert(product_id, new_quantity);
        debug!(product_id, quantity = new_quantity, "Cart line quantity set");
        Ok(Some(new_quantity))
    }

    /// Deletes the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        let removed = self.items.len() != before;
        if removed {
            debug!(product_id, "Cart line removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Lines resolved against the catalog, in insertion order.
    pub fn lines(&self) -> StoreResult<Vec<CartLineView>> {
        self.items
            .iter()
            .map(|item| -> StoreResult<CartLineView> {
                let product = self.catalog.find_product(&item.product_id)?;
                Ok(CartLineView {
                    product: product.into(),
                    quantity: item.quantity,
                    line_total: line_total(product.price, item.quantity)
                        .ok_or(StoreError::InvalidQuantity(i64::from(item.quantity)))?,
                })
            })
            .collect()
    }

    /// Sum of unit price times quantity. A stale product id is `NotFound`.
    pub fn subtotal(&self) -> StoreResult<u64> {
        self.subtotal_with(None)
    }

    pub fn shipping_fee(&self, policy: &ShippingPolicy) -> StoreResult<u64> {
        Ok(policy.fee_for(self.subtotal()?))
    }

    /// Subtotal plus shipping, before any discount.
    pub fn gross(&self, policy: &ShippingPolicy) -> StoreResult<u64> {
        let subtotal = self.subtotal()?;
        gross_amount(subtotal, policy)
    }

    /// Subtotal plus shipping minus `discount`.
    ///
    /// Fails with `InvalidDiscount` when `discount` is negative or exceeds
    /// subtotal plus shipping.
    pub fn total(&self, policy: &ShippingPolicy, discount: i64) -> StoreResult<u64> {
        Ok(self.totals(policy, discount)?.total)
    }

    pub fn totals(&self, policy: &ShippingPolicy, discount: i64) -> StoreResult<CartTotals> {
        let subtotal = self.subtotal()?;
        let shipping = policy.fee_for(subtotal);
        let gross = gross_amount(subtotal, policy)?;

        let discount_amount =
            u64::try_from(discount).map_err(|_| StoreError::InvalidDiscount(discount))?;
        if discount_amount > gross {
            return Err(StoreError::InvalidDiscount(discount));
        }

        Ok(CartTotals {
            subtotal,
            shipping,
            discount: discount_amount,
            total: gross - discount_amount,
            item_count: self.item_count(),
        })
    }

    /// Subtotal, optionally with one line's quantity replaced.
    fn subtotal_with(&self, replaced: Option<(&str, u32)>) -> StoreResult<u64> {
        let mut sum = 0u64;
        let mut seen = false;

        for item in &self.items {
            let quantity = match replaced {
                Some((id, quantity)) if id == item.product_id => {
                    seen = true;
                    quantity
                }
                _ => item.quantity,
            };
            sum = self.add_line(sum, &item.product_id, quantity)?;
        }

        if let Some((id, quantity)) = replaced.filter(|_| !seen) {
            sum = self.add_line(sum, id, quantity)?;
        }
        Ok(sum)
    }

    fn add_line(&self, sum: u64, product_id: &str, quantity: u32) -> StoreResult<u64> {
        let product = self.catalog.find_product(product_id)?;
        line_total(product.price, quantity)
            .and_then(|line| sum.checked_add(line))
            .filter(|total| *total <= MAX_SUBTOTAL)
            .ok_or(StoreError::InvalidQuantity(i64::from(quantity)))
    }

    /// Rejects a line quantity that would push the subtotal past [`MAX_SUBTOTAL`].
    fn ensure_fits(&self, product_id: &str, quantity: u32, requested: i64) -> StoreResult<()> {
        self.subtotal_with(Some((product_id, quantity)))
            .map(|_| ())
            .map_err(|e| match e {
                StoreError::InvalidQuantity(_) => StoreError::InvalidQuantity(requested),
                other => other,
            })
    }

    fn upsert(&mut self, product_id: &str, quantity: u32) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(existing) => existing.quantity = quantity,
            None => self.items.push(CartLineItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
    }
}

fn line_total(price: u64, quantity: u32) -> Option<u64> {
    price.checked_mul(u64::from(quantity))
}

fn gross_amount(subtotal: u64, policy: &ShippingPolicy) -> StoreResult<u64> {
    subtotal
        .checked_add(policy.fee_for(subtotal))
        .ok_or_else(|| StoreError::Config("shipping fee overflows the cart total".into()))
}

/// Validates a caller-supplied quantity as a positive `u32`.
fn positive_quantity(quantity: i64) -> StoreResult<u32> {
    if quantity < 1 {
        return Err(StoreError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| StoreError::InvalidQuantity(quantity))
}
