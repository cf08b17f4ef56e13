//! Integration tests for the storefront REST API
//!
//! These tests drive the full router in-process:
//! - Catalog listing, filtering and pagination
//! - Product detail, related products, brands and services
//! - Session-scoped cart, wishlist and booking operations
//! - Error mapping

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use storefront::catalog::Catalog;
use storefront::config::PricingConfig;
use storefront::router::create_app_router;
use storefront::session::AppState;

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let mut pricing = PricingConfig::default();
    pricing.promo_codes.insert("GIAM50K".into(), 50_000);

    let state = Arc::new(AppState::new(Catalog::embedded().unwrap(), pricing));
    create_app_router(state)
}

/// Sends a request, optionally tagged with a session id, and decodes the JSON body
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_products_paginates() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 24);
    assert_eq!(body["page"], 1);
    assert_eq!(body["perPage"], 12);
    assert_eq!(body["items"].as_array().unwrap().len(), 12);
    assert_eq!(body["items"][0]["id"], "f1");

    let (_, body) = send(&app, "GET", "/products?page=2&perPage=10", None, None).await;
    assert_eq!(ids(&body["items"])[0], "t5");

    let (_, body) = send(&app, "GET", "/products?page=5&perPage=10", None, None).await;
    assert_eq!(body["total"], 24);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_by_category_and_brand() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "GET",
        "/products?category=speakers&brand=Sony",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec!["s1", "s3", "s5"]);

    let (_, body) = send(
        &app,
        "GET",
        "/products?category=fans&subcategory=table",
        None,
        None,
    )
    .await;
    assert_eq!(ids(&body["items"]), vec!["f3", "f4"]);
}

#[tokio::test]
async fn test_search_and_exact_price() {
    let app = create_test_app();

    let (_, body) = send(&app, "GET", "/products?q=oled", None, None).await;
    assert_eq!(ids(&body["items"]), vec!["t1", "t2"]);

    let (_, body) = send(&app, "GET", "/products?min=1799000&max=1799000", None, None).await;
    assert_eq!(ids(&body["items"]), vec!["s1"]);

    let (_, body) = send(&app, "GET", "/products?q=nothing-matches", None, None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_inverted_price_range() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/products?min=10&max=5", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_RANGE");
}

#[tokio::test]
async fn test_product_detail() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/products/s1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Loa Bluetooth Không Dây");
    assert_eq!(body["price"], 1_799_000);
    assert_eq!(body["originalPrice"], 2_999_000);
    assert_eq!(body["priceLabel"], "1.799.000đ");
    assert_eq!(body["discountPercent"], 40);
    assert_eq!(body["subcategory"], "bluetooth");

    let (status, body) = send(&app, "GET", "/products/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_related_products() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/products/c1/related", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["c2", "c3", "c4", "c5"]);
}

#[tokio::test]
async fn test_categories_and_brands() {
    let app = create_test_app();

    let (_, body) = send(&app, "GET", "/categories", None, None).await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0]["slug"], "speakers");
    assert_eq!(categories[0]["subcategories"][2]["slug"], "home-theater");

    let (status, body) = send(&app, "GET", "/categories/fans/brands", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Mitsubishi", "Panasonic", "Xiaomi"]));
}

#[tokio::test]
async fn test_services() {
    let app = create_test_app();

    let (_, body) = send(&app, "GET", "/services", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 8);

    let (_, body) = send(&app, "GET", "/services?category=tv", None, None).await;
    let services = body.as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["linkUrl"], "/services/tv-repair");
    assert_eq!(services[0]["price"], "300.000đ - 1.500.000đ");

    let (status, body) = send(&app, "GET", "/services/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Sửa Chữa Tivi");

    let (status, body) = send(&app, "GET", "/services/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_bad_query_gets_error_body() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/products?category=phones", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    let (status, body) = send(&app, "GET", "/products?page=two", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    let (status, body) = send(&app, "GET", "/categories/phones/brands", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_new_session_gets_cookie() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/cart/items")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"productId":"s1"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("storefront_session="));

    // The cookie resumes the same cart
    let request = Request::builder()
        .method("GET")
        .uri("/cart")
        .header("cookie", cookie.split(';').next().unwrap())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get("set-cookie").is_none());

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["items"][0]["product"]["id"], "s1");
}

#[tokio::test]
async fn test_cart_totals_and_shipping() {
    let app = create_test_app();
    let session = Some("cart-totals");

    let (status, body) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "s1", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["subtotal"], 1_799_000);
    assert_eq!(body["totals"]["shipping"], 50_000);
    assert_eq!(body["totals"]["total"], 1_849_000);

    // Crossing the free-shipping threshold
    let (_, body) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "f3" })),
    )
    .await;
    assert_eq!(body["totals"]["subtotal"], 2_089_000);
    assert_eq!(body["totals"]["shipping"], 0);
    assert_eq!(body["totals"]["itemCount"], 2);

    let (_, body) = send(&app, "GET", "/cart?promoCode=GIAM50K", session, None).await;
    assert_eq!(body["totals"]["discount"], 50_000);
    assert_eq!(body["totals"]["total"], 2_039_000);

    let (_, body) = send(&app, "GET", "/cart?promoCode=UNKNOWN", session, None).await;
    assert_eq!(body["totals"]["discount"], 0);
}

#[tokio::test]
async fn test_cart_quantity_updates() {
    let app = create_test_app();
    let session = Some("cart-quantities");

    send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "t3", "quantity": 2 })),
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "t3", "quantity": 3 })),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["items"][0]["lineTotal"], 49_950_000);

    let (_, body) = send(
        &app,
        "PUT",
        "/cart/items/t3",
        session,
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(body["items"][0]["quantity"], 1);

    // Setting zero removes the line
    let (status, body) = send(
        &app,
        "PUT",
        "/cart/items/t3",
        session,
        Some(json!({ "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_rejects_bad_input() {
    let app = create_test_app();
    let session = Some("cart-errors");

    let (status, body) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "s1", "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_QUANTITY");

    let (status, _) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "s1", "quantity": 1.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    let (_, body) = send(&app, "GET", "/cart", session, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_remove_is_noop_when_absent() {
    let app = create_test_app();
    let session = Some("cart-remove");

    send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "c1" })),
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/cart/items/c1", session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", "/cart/items/c1", session, None).await;
    assert_eq!(status, StatusCode::OK);

    send(
        &app,
        "POST",
        "/cart/items",
        session,
        Some(json!({ "productId": "c2", "quantity": 2 })),
    )
    .await;
    let (status, body) = send(&app, "DELETE", "/cart", session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["totals"]["itemCount"], 0);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = create_test_app();

    send(
        &app,
        "POST",
        "/cart/items",
        Some("session-a"),
        Some(json!({ "productId": "f1", "quantity": 4 })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/cart", Some("session-b"), None).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["sessionId"], "session-b");
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_toggle_and_list() {
    let app = create_test_app();
    let session = Some("wishlist");

    let (status, body) = send(&app, "POST", "/wishlist/t1/toggle", session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wishlisted"], true);

    send(&app, "POST", "/wishlist/s2/toggle", session, None).await;

    let (_, body) = send(&app, "GET", "/wishlist", session, None).await;
    assert_eq!(ids(&body["items"]), vec!["t1", "s2"]);

    let (_, body) = send(&app, "POST", "/wishlist/t1/toggle", session, None).await;
    assert_eq!(body["wishlisted"], false);
    assert_eq!(body["count"], 1);

    let (_, body) = send(&app, "DELETE", "/wishlist/s2", session, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "POST", "/wishlist/ghost/toggle", session, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_move_to_cart() {
    let app = create_test_app();
    let session = Some("wishlist-cart");

    let (status, _) = send(&app, "POST", "/wishlist/c2/cart", session, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/wishlist/c2/toggle", session, None).await;
    let (status, body) = send(&app, "POST", "/wishlist/c2/cart", session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["product"]["id"], "c2");
    assert_eq!(body["items"][0]["quantity"], 1);

    // Still wishlisted
    let (_, body) = send(&app, "GET", "/wishlist", session, None).await;
    assert_eq!(ids(&body["items"]), vec!["c2"]);
}

#[tokio::test]
async fn test_reads_and_rejections_store_no_session() {
    let state = Arc::new(AppState::new(
        Catalog::embedded().unwrap(),
        PricingConfig::default(),
    ));
    let app = create_app_router(state.clone());

    for _ in 0..20 {
        send(&app, "GET", "/cart", None, None).await;
        send(&app, "GET", "/wishlist", None, None).await;
        send(&app, "GET", "/bookings", None, None).await;
        send(&app, "POST", "/wishlist/ghost/toggle", None, None).await;
        send(&app, "DELETE", "/cart/items/s1", None, None).await;
        send(
            &app,
            "POST",
            "/cart/items",
            None,
            Some(json!({ "productId": "s1", "quantity": 0 })),
        )
        .await;
    }

    assert!(state.carts.is_empty());
    assert!(state.wishlists.is_empty());
    assert!(state.bookings.is_empty());

    send(
        &app,
        "POST",
        "/cart/items",
        Some("keeper"),
        Some(json!({ "productId": "s1" })),
    )
    .await;
    assert_eq!(state.carts.len(), 1);

    send(&app, "DELETE", "/cart", Some("keeper"), None).await;
    assert!(state.carts.is_empty());
}

// =============================================================================
// Bookings
// =============================================================================

fn booking(date: &str, time: &str) -> Value {
    json!({
        "date": date,
        "time": time,
        "name": "Nguyễn Văn An",
        "phone": "0901 234 567",
        "message": "Tivi không lên hình"
    })
}

#[tokio::test]
async fn test_book_and_list_services() {
    let app = create_test_app();
    let session = Some("booking-flow");

    let (status, body) = send(&app, "GET", "/bookings/slots", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(body[0], "09:00");

    let (status, created) = send(
        &app,
        "POST",
        "/services/1/bookings",
        session,
        Some(booking("2099-06-01", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["serviceId"], "1");
    assert_eq!(created["serviceTitle"], "Sửa Chữa Tivi");
    assert_eq!(created["date"], "2099-06-01");
    assert_eq!(created["time"], "09:00");

    let (status, body) = send(&app, "GET", "/bookings", session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], "booking-flow");
    assert_eq!(body["items"][0]["id"], created["id"]);

    // Other sessions see nothing
    let (_, body) = send(&app, "GET", "/bookings", Some("someone-else"), None).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    let uri = format!("/bookings/{}", created["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, session, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", &uri, session, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_rejects_bad_requests() {
    let app = create_test_app();
    let session = Some("booking-errors");

    send(
        &app,
        "POST",
        "/services/2/bookings",
        session,
        Some(booking("2099-06-01", "14:00")),
    )
    .await;

    // Same slot twice
    let (status, body) = send(
        &app,
        "POST",
        "/services/3/bookings",
        session,
        Some(booking("2099-06-01", "14:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_BOOKING");

    for (date, time) in [("2000-01-01", "09:00"), ("2099-06-01", "12:00")] {
        let (status, body) = send(
            &app,
            "POST",
            "/services/1/bookings",
            session,
            Some(booking(date, time)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", date, time);
        assert_eq!(body["error"], "INVALID_BOOKING");
    }

    let (status, body) = send(
        &app,
        "POST",
        "/services/99/bookings",
        session,
        Some(booking("2099-06-01", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = send(
        &app,
        "POST",
        "/services/1/bookings",
        session,
        Some(json!({ "date": "06/01/2099", "time": "09:00", "name": "An", "phone": "0901234567" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    let (_, body) = send(&app, "GET", "/bookings", session, None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}
