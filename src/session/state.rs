//! Storefront State Management
//!
//! This module holds the shared catalog and the per-session carts and
//! wishlists, keyed by session id.

use crate::booking::BookingList;
use crate::cart::{CartLedger, ShippingPolicy};
use crate::catalog::{Catalog, SharedCatalog};
use crate::config::{Config, PricingConfig};
use crate::error::StoreResult;
use crate::wishlist::WishlistSet;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: the read-only catalog plus session-scoped
/// carts, wishlists and bookings
pub struct AppState {
    /// Immutable after startup; readers need no locking.
    pub catalog: SharedCatalog,

    /// Non-empty ledgers by session. Updates run under the entry's shard
    /// lock, so every ledger mutation is atomic with respect to the others.
    pub carts: DashMap<String, CartLedger>,

    /// Non-empty wishlists by session.
    pub wishlists: DashMap<String, WishlistSet>,

    /// Repair bookings by session.
    pub bookings: DashMap<String, BookingList>,

    /// Shipping threshold, flat fee and promo codes.
    pub pricing: PricingConfig,
}

impl AppState {
    pub fn new(catalog: Catalog, pricing: PricingConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            carts: DashMap::new(),
            wishlists: DashMap::new(),
            bookings: DashMap::new(),
            pricing,
        }
    }

    /// State seeded from the configured seed file, or the embedded dataset.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let catalog = match &config.catalog.seed_path {
            Some(path) => {
                info!(path = %path.display(), "Loading catalog seed");
                Catalog::from_file(path)?
            }
            None => Catalog::embedded()?,
        };

        Ok(Self::new(catalog, config.pricing.clone()))
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::from(&self.pricing)
    }

    /// Runs `f` against the session's cart without creating one.
    ///
    /// A session with no stored cart is seen as an empty ledger.
    pub fn read_cart<T>(&self, session_id: &str, f: impl FnOnce(&CartLedger) -> T) -> T {
        read_entry(&self.carts, session_id, || self.empty_cart(), f)
    }

    /// Runs a mutation against the session's cart under its shard lock.
    ///
    /// The cart is stored only once it holds a line, and dropped again when
    /// a mutation empties it. A failed mutation on a new session stores
    /// nothing.
    pub fn update_cart<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut CartLedger) -> StoreResult<T>,
    ) -> StoreResult<T> {
        update_entry(&self.carts, session_id, || self.empty_cart(), f)
    }

    pub fn read_wishlist<T>(&self, session_id: &str, f: impl FnOnce(&WishlistSet) -> T) -> T {
        read_entry(&self.wishlists, session_id, || self.empty_wishlist(), f)
    }

    /// Wishlist counterpart of [`AppState::update_cart`].
    pub fn update_wishlist<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut WishlistSet) -> StoreResult<T>,
    ) -> StoreResult<T> {
        update_entry(&self.wishlists, session_id, || self.empty_wishlist(), f)
    }

    pub fn read_bookings<T>(&self, session_id: &str, f: impl FnOnce(&BookingList) -> T) -> T {
        read_entry(&self.bookings, session_id, || self.empty_bookings(), f)
    }

    /// Booking counterpart of [`AppState::update_cart`].
    pub fn update_bookings<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut BookingList) -> StoreResult<T>,
    ) -> StoreResult<T> {
        update_entry(&self.bookings, session_id, || self.empty_bookings(), f)
    }

    fn empty_cart(&self) -> CartLedger {
        CartLedger::new(Arc::clone(&self.catalog))
    }

    fn empty_wishlist(&self) -> WishlistSet {
        WishlistSet::new(Arc::clone(&self.catalog))
    }

    fn empty_bookings(&self) -> BookingList {
        BookingList::new(Arc::clone(&self.catalog))
    }
}

// =============================================================================
// Session Entries
// =============================================================================

/// Per-session value that is only worth storing while it holds something.
trait SessionEntry {
    fn is_empty(&self) -> bool;
}

impl SessionEntry for CartLedger {
    fn is_empty(&self) -> bool {
        CartLedger::is_empty(self)
    }
}

impl SessionEntry for WishlistSet {
    fn is_empty(&self) -> bool {
        WishlistSet::is_empty(self)
    }
}

impl SessionEntry for BookingList {
    fn is_empty(&self) -> bool {
        BookingList::is_empty(self)
    }
}

fn read_entry<V, T>(
    map: &DashMap<String, V>,
    session_id: &str,
    empty: impl FnOnce() -> V,
    f: impl FnOnce(&V) -> T,
) -> T {
    match map.get(session_id) {
        Some(value) => f(&value),
        None => f(&empty()),
    }
}

fn update_entry<V: SessionEntry, T>(
    map: &DashMap<String, V>,
    session_id: &str,
    empty: impl FnOnce() -> V,
    f: impl FnOnce(&mut V) -> StoreResult<T>,
) -> StoreResult<T> {
    match map.entry(session_id.to_string()) {
        Entry::Occupied(mut entry) => {
            let out = f(entry.get_mut());
            if entry.get().is_empty() {
                entry.remove();
            }
            out
        }
        Entry::Vacant(entry) => {
            let mut value = empty();
            let out = f(&mut value)?;
            if !value.is_empty() {
                entry.insert(value);
            }
            Ok(out)
        }
    }
}
