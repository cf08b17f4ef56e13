//! Storefront Library
//!
//! Catalog browsing, category filtering, a shopping cart, a wishlist and
//! repair bookings for a consumer electronics store, served over REST and
//! MCP.

// Domain modules
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod mcp;
pub mod session;
pub mod wishlist;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;

pub use error::{StoreError, StoreResult};
