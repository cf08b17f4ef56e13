//! Wishlist Domain Module
//!
//! - The wishlist set (favorites per session)
//! - REST API handlers

pub mod handlers;
pub mod set;

pub use handlers::routes;
pub use set::WishlistSet;
