//! REST API handlers for wishlist operations

use super::set::WishlistSet;
use crate::catalog::helpers::ProductView;
use crate::cart::handlers::cart_response;
use crate::error::{StoreError, StoreResult};
use crate::session::{attach_session_cookie, resolve_session_id, SharedState};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

/// Creates routes for wishlist-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/wishlist", get(view_wishlist))
        .route("/wishlist/:product_id", delete(remove_item))
        .route("/wishlist/:product_id/toggle", post(toggle_item))
        .route("/wishlist/:product_id/cart", post(move_to_cart))
}

/// Response for wishlist operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub session_id: String,
    pub items: Vec<ProductView>,
}

/// Response for the toggle endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub product_id: String,
    pub wishlisted: bool,
    pub count: usize,
}

fn with_cookie(body: impl Serialize, session_id: &str, is_new: bool) -> Response {
    let mut response = Json(body).into_response();
    attach_session_cookie(&mut response, session_id, is_new);
    response
}

fn wishlist_body(wishlist: &WishlistSet, session_id: &str) -> WishlistResponse {
    WishlistResponse {
        session_id: session_id.to_string(),
        items: wishlist.list().into_iter().map(ProductView::from).collect(),
    }
}

/// Endpoint: GET /wishlist
async fn view_wishlist(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let body = state.read_wishlist(&session_id, |w| wishlist_body(w, &session_id));
    with_cookie(body, &session_id, is_new)
}

/// Endpoint: POST /wishlist/{product_id}/toggle
async fn toggle_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> StoreResult<Response> {
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_wishlist(&session_id, |wishlist| {
        let wishlisted = wishlist.toggle(&product_id)?;
        Ok(ToggleResponse {
            product_id: product_id.clone(),
            wishlisted,
            count: wishlist.len(),
        })
    })?;

    Ok(with_cookie(body, &session_id, is_new))
}

/// Endpoint: DELETE /wishlist/{product_id}
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> StoreResult<Response> {
    let (session_id, is_new) = resolve_session_id(&headers);

    let body = state.update_wishlist(&session_id, |wishlist| {
        wishlist.remove(&product_id);
        Ok(wishlist_body(wishlist, &session_id))
    })?;

    Ok(with_cookie(body, &session_id, is_new))
}

/// Endpoint: POST /wishlist/{product_id}/cart
/// Adds one unit of a wishlisted product to the session cart. The product
/// stays on the wishlist.
async fn move_to_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> StoreResult<Response> {
    let (session_id, is_new) = resolve_session_id(&headers);

    if !state.read_wishlist(&session_id, |w| w.contains(&product_id)) {
        return Err(StoreError::NotFound(product_id));
    }

    let body = state.update_cart(&session_id, |cart| {
        cart.add_or_increment(&product_id, 1)?;
        cart_response(&state, &session_id, cart, None)
    })?;
    info!(session = %session_id, product_id = %product_id, "Wishlist item added to cart");

    Ok(with_cookie(body, &session_id, is_new))
}
