//! Repair Booking Models
//!
//! A booking reserves one of the fixed daily time slots for a repair
//! service.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Bookable start times, every day
pub const AVAILABLE_TIMES: [&str; 7] = [
    "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00",
];

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;
const MAX_MESSAGE_CHARS: usize = 1000;

/// Body for POST /services/{id}/bookings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub phone: String,

    /// Description of the problem
    #[serde(default)]
    pub message: String,
}

impl BookingInput {
    /// Checks the slot, contact details and message. `today` is the first
    /// bookable date.
    pub fn validate(&self, today: NaiveDate) -> StoreResult<()> {
        if self.date < today {
            return Err(StoreError::InvalidBooking(format!(
                "date {} is in the past",
                self.date
            )));
        }

        if !AVAILABLE_TIMES.contains(&self.time.as_str()) {
            return Err(StoreError::InvalidBooking(format!(
                "time {} is not an available slot",
                self.time
            )));
        }

        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidBooking("name is required".into()));
        }

        if !is_valid_phone(&self.phone) {
            return Err(StoreError::InvalidBooking(format!(
                "invalid phone number: {}",
                self.phone
            )));
        }

        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(StoreError::InvalidBooking(format!(
                "message longer than {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        Ok(())
    }
}

/// Digits with optional spaces, dots or dashes, and an optional leading `+`.
fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);

    let mut digits = 0;
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits += 1,
            ' ' | '.' | '-' => {}
            _ => return false,
        }
    }

    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// A confirmed booking
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    pub service_title: String,
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub phone: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,

    pub created_at: DateTime<Utc>,
}

/// Bookings of one session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub session_id: String,
    pub items: Vec<Booking>,
}
