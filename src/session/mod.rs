//! Session Module
//!
//! Lifts carts and wishlists out of a single page lifetime into a store
//! keyed by session id:
//! - Application state (catalog, per-session ledgers and wishlists)
//! - Session id resolution from headers and cookies

pub mod helpers;
pub mod state;

pub use helpers::{attach_session_cookie, resolve_session_id};
pub use state::{AppState, SharedState};
