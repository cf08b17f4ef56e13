//! Repair Booking Module
//!
//! - Booking models and slot validation
//! - The per-session booking schedule
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod schedule;

pub use handlers::routes;
pub use schedule::BookingList;
