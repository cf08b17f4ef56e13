//! REST API handlers for repair bookings

use super::models::{BookingInput, BookingsResponse, AVAILABLE_TIMES};
use super::schedule::BookingList;
use crate::error::{StoreError, StoreResult};
use crate::session::{attach_session_cookie, resolve_session_id, SharedState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Local;
use tracing::info;

/// Creates routes for booking-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/services/:id/bookings", post(create_booking))
        .route("/bookings", get(list_bookings))
        .route("/bookings/slots", get(list_slots))
        .route("/bookings/:booking_id", delete(cancel_booking))
}

fn bookings_body(schedule: &BookingList, session_id: &str) -> BookingsResponse {
    BookingsResponse {
        session_id: session_id.to_string(),
        items: schedule.list().to_vec(),
    }
}

/// Endpoint: POST /services/{id}/bookings
async fn create_booking(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(service_id): Path<String>,
    payload: Result<Json<BookingInput>, JsonRejection>,
) -> StoreResult<Response> {
    let Json(payload) = payload?;
    let (session_id, is_new) = resolve_session_id(&headers);
    let today = Local::now().date_naive();

    let booking = state.update_bookings(&session_id, |schedule| {
        schedule.book(&service_id, payload, today).cloned()
    })?;
    info!(
        session = %session_id,
        service_id = %service_id,
        date = %booking.date,
        time = %booking.time,
        "Service booked"
    );

    let mut response = (StatusCode::CREATED, Json(booking)).into_response();
    attach_session_cookie(&mut response, &session_id, is_new);
    Ok(response)
}

/// Endpoint: GET /bookings
async fn list_bookings(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let body = state.read_bookings(&session_id, |s| bookings_body(s, &session_id));

    let mut response = Json(body).into_response();
    attach_session_cookie(&mut response, &session_id, is_new);
    response
}

/// Endpoint: GET /bookings/slots
async fn list_slots() -> Json<[&'static str; 7]> {
    Json(AVAILABLE_TIMES)
}

/// Endpoint: DELETE /bookings/{booking_id}
async fn cancel_booking(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(booking_id): Path<String>,
) -> StoreResult<Json<BookingsResponse>> {
    let (session_id, _) = resolve_session_id(&headers);

    let body = state.update_bookings(&session_id, |schedule| {
        if !schedule.cancel(&booking_id) {
            return Err(StoreError::NotFound(booking_id.clone()));
        }
        Ok(bookings_body(schedule, &session_id))
    })?;
    info!(session = %session_id, booking = %booking_id, "Booking cancelled");

    Ok(Json(body))
}
