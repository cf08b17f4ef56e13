//! Booking Schedule
//!
//! The repair bookings made by one session, in the order they were made.
//! A session cannot hold two bookings for the same date and time.

use super::models::{Booking, BookingInput};
use crate::catalog::SharedCatalog;
use crate::error::{StoreError, StoreResult};
use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BookingList {
    catalog: SharedCatalog,
    bookings: Vec<Booking>,
}

impl BookingList {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            bookings: Vec::new(),
        }
    }

    /// Books `service_id` for the slot in `input`.
    ///
    /// Fails with `NotFound` for an unknown service and `InvalidBooking` for
    /// a bad slot, bad contact details, or a slot this session already holds.
    pub fn book(
        &mut self,
        service_id: &str,
        input: BookingInput,
        today: NaiveDate,
    ) -> StoreResult<&Booking> {
        let service = self.catalog.find_service(service_id)?;
        input.validate(today)?;

        if self
            .bookings
            .iter()
            .any(|b| b.date == input.date && b.time == input.time)
        {
            return Err(StoreError::InvalidBooking(format!(
                "slot {} {} is already booked",
                input.date, input.time
            )));
        }

        let booking = Booking {
            id: Uuid::new_v4().simple().to_string(),
            service_id: service.id.clone(),
            service_title: service.title.clone(),
            date: input.date,
            time: input.time,
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            message: input.message.trim().to_string(),
            created_at: Utc::now(),
        };
        debug!(booking = %booking.id, service_id, date = %booking.date, time = %booking.time, "Booking created");

        self.bookings.push(booking);
        let index = self.bookings.len() - 1;
        Ok(&self.bookings[index])
    }

    /// Drops a booking. Returns whether it existed.
    pub fn cancel(&mut self, booking_id: &str) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|b| b.id != booking_id);
        self.bookings.len() != before
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
