//! REST API handlers for shopping cart operations
//!
//! Every endpoint answers with the full cart state so clients can re-render
//! from a single response.

use super::{helpers::*, ledger::CartLedger, models::*};
use crate::error::StoreResult;
use crate::session::{attach_session_cookie, resolve_session_id, AppState, SharedState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:product_id", put(set_quantity).delete(remove_item))
}

/// Builds the response body for a ledger snapshot.
///
/// A promo worth more than the order is capped at subtotal plus shipping.
pub fn cart_response(
    state: &AppState,
    session_id: &str,
    ledger: &CartLedger,
    promo_code: Option<&str>,
) -> StoreResult<CartResponse> {
    let policy = state.shipping_policy();
    let gross = ledger.gross(&policy)?;
    let discount =
        promo_discount(&state.pricing, promo_code).min(i64::try_from(gross).unwrap_or(i64::MAX));

    Ok(CartResponse {
        session_id: session_id.to_string(),
        items: ledger.lines()?,
        totals: ledger.totals(&policy, discount)?,
    })
}

fn respond(body: CartResponse, is_new_session: bool) -> Response {
    let session_id = body.session_id.clone();
    let mut response = Json(body).into_response();
    attach_session_cookie(&mut response, &session_id, is_new_session);
    response
}

/// Endpoint: GET /cart
async fn view_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    query: Result<Query<CartQuery>, QueryRejection>,
) -> StoreResult<Response> {
    let Query(query) = query?;
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.read_cart(&session_id, |cart| {
        cart_response(&state, &session_id, cart, query.promo_code.as_deref())
    })?;

    Ok(respond(body, is_new))
}

/// Endpoint: DELETE /cart
async fn clear_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> StoreResult<Response> {
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_cart(&session_id, |cart| {
        cart.clear();
        cart_response(&state, &session_id, cart, None)
    })?;
    info!(session = %session_id, "Cart cleared");

    Ok(respond(body, is_new))
}

/// Endpoint: POST /cart/items
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<AddItemInput>, JsonRejection>,
) -> StoreResult<Response> {
    let Json(payload) = payload?;
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_cart(&session_id, |cart| {
        let quantity = cart.add_or_increment(&payload.product_id, payload.quantity)?;
        info!(
            session = %session_id,
            product_id = %payload.product_id,
            quantity,
            "Added to cart"
        );
        cart_response(&state, &session_id, cart, None)
    })?;

    Ok(respond(body, is_new))
}

/// Endpoint: PUT /cart/items/{product_id}
async fn set_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    payload: Result<Json<SetQuantityInput>, JsonRejection>,
) -> StoreResult<Response> {
    let Json(payload) = payload?;
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_cart(&session_id, |cart| {
        cart.set_quantity(&product_id, payload.quantity)?;
        cart_response(&state, &session_id, cart, None)
    })?;

    Ok(respond(body, is_new))
}

/// Endpoint: DELETE /cart/items/{product_id}
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> StoreResult<Response> {
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_cart(&session_id, |cart| {
        cart.remove(&product_id);
        cart_response(&state, &session_id, cart, None)
    })?;

    Ok(respond(body, is_new))
}
