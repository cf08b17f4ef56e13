//! Storefront Error Types
//!
//! Every core operation reports failures through [`StoreError`]. All variants
//! are local and recoverable; the HTTP layer maps them onto status codes.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result alias used across the catalog, cart and wishlist modules.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidRange { min: u64, max: u64 },
    #[error("Invalid discount: {0}")]
    InvalidDiscount(i64),
    #[error("Invalid booking: {0}")]
    InvalidBooking(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "NOT_FOUND",
            StoreError::InvalidQuantity(_) => "INVALID_QUANTITY",
            StoreError::InvalidRange { .. } => "INVALID_RANGE",
            StoreError::InvalidDiscount(_) => "INVALID_DISCOUNT",
            StoreError::InvalidBooking(_) => "INVALID_BOOKING",
            StoreError::InvalidRequest(_) => "INVALID_REQUEST",
            StoreError::InvalidSeed(_) => "INVALID_SEED",
            StoreError::Config(_) => "CONFIG",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidQuantity(_)
            | StoreError::InvalidRange { .. }
            | StoreError::InvalidDiscount(_)
            | StoreError::InvalidBooking(_)
            | StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::InvalidSeed(_) | StoreError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<QueryRejection> for StoreError {
    fn from(rejection: QueryRejection) -> Self {
        StoreError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for StoreError {
    fn from(rejection: JsonRejection) -> Self {
        StoreError::InvalidRequest(rejection.body_text())
    }
}

/// JSON body returned for any failed REST call
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    pub code: u16,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.code(),
            message: self.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
